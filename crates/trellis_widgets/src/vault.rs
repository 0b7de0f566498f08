//! File upload vaults

use serde_json::json;
use trellis_core::{ComponentType, Container, EventArgs, SubscriptionId, UiContext, WidgetOptions};

use crate::error::{Result, WidgetError};

component_type!(
    /// A file upload area
    Vault,
    Vault,
    "Vault::new"
);

/// Native event raised once all queued files are uploaded
pub const UPLOAD_COMPLETE_EVENT: &str = "onUploadComplete";

impl Vault {
    pub fn new(
        ctx: &mut UiContext,
        container: impl Into<Container>,
        name: impl Into<String>,
    ) -> Result<Self> {
        let options = WidgetOptions::from_config(Self::KIND, ctx.config());
        Ok(Self::mount(ctx, container, name, options)?)
    }

    pub fn set_upload_url(&self, ctx: &mut UiContext, url: &str) -> Result<()> {
        if url.trim().is_empty() {
            return Err(WidgetError::InvalidParam {
                widget: "vault",
                param: "url",
                reason: "upload url is empty".into(),
            });
        }
        ctx.call(self.id(), "setUploadUrl", &[json!(url)])?;
        Ok(())
    }

    /// Start uploading the queued files
    pub fn upload(&self, ctx: &mut UiContext) -> Result<()> {
        ctx.call(self.id(), "upload", &[])?;
        Ok(())
    }

    pub fn on_upload_complete<C, F>(
        &self,
        ctx: &mut UiContext,
        handler: F,
        context: C,
    ) -> Result<SubscriptionId>
    where
        C: 'static,
        F: Fn(&EventArgs, &C) + 'static,
    {
        Ok(ctx
            .tree_mut()
            .attach_action(self.id(), UPLOAD_COMPLETE_EVENT, handler, context)?)
    }
}
