//! UI context
//!
//! Bundles the component tree with the toolkit that creates native widgets
//! and the loaded configuration. Widget constructors take the context by
//! `&mut` so a whole UI is driven from one place.

use serde_json::Value;

use crate::component::{ComponentId, ComponentTree};
use crate::config::TrellisConfig;
use crate::error::Result;
use crate::toolkit::Toolkit;

pub struct UiContext {
    tree: ComponentTree,
    toolkit: Box<dyn Toolkit>,
    config: TrellisConfig,
}

impl UiContext {
    pub fn new(toolkit: impl Toolkit + 'static, config: TrellisConfig) -> Self {
        tracing::debug!(toolkit = toolkit.name(), skin = %config.skin, "creating ui context");
        Self {
            tree: ComponentTree::new(),
            toolkit: Box::new(toolkit),
            config,
        }
    }

    pub fn tree(&self) -> &ComponentTree {
        &self.tree
    }

    pub fn tree_mut(&mut self) -> &mut ComponentTree {
        &mut self.tree
    }

    pub fn toolkit(&self) -> &dyn Toolkit {
        self.toolkit.as_ref()
    }

    pub fn toolkit_mut(&mut self) -> &mut dyn Toolkit {
        self.toolkit.as_mut()
    }

    pub fn config(&self) -> &TrellisConfig {
        &self.config
    }

    /// Invoke a native method on a component's widget
    pub fn call(&mut self, id: ComponentId, method: &str, args: &[Value]) -> Result<Value> {
        self.tree.call(id, method, args)
    }

    /// Destroy `id` and its subtree
    pub fn destroy(&mut self, id: ComponentId) {
        self.tree.destroy(id);
    }

    /// Destroy every root component and release leftover placeholders
    pub fn shutdown(&mut self) {
        let roots = self.tree.roots();
        tracing::debug!(roots = roots.len(), "shutting down ui context");
        for root in roots.into_iter().rev() {
            self.tree.destroy(root);
        }
        // Leftover placeholders hold no native widget
        let leftovers: Vec<ComponentId> = self.tree.ids().collect();
        for id in leftovers {
            self.tree.destroy(id);
        }
    }
}

impl std::fmt::Debug for UiContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UiContext")
            .field("toolkit", &self.toolkit.name())
            .field("tree", &self.tree)
            .field("config", &self.config)
            .finish()
    }
}
