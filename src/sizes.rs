//! Widget display-size selection.
//!
//! Each widget cycles through an ordered set of size tokens (most use three
//! levels, a few offer four). The controller validates transitions against
//! its set, remembers the choice through a [`SizeStore`], and recovers the
//! stored choice on the next construction — an unknown or stale stored token
//! falls back to the widget's default instead of poisoning the layout.

use std::fmt;
use std::rc::Rc;

use crate::error::ConfigError;
use crate::store::SizeStore;

// =============================================================================
// SizeSet
// =============================================================================

/// Ordered enumeration of the size tokens a widget may take.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SizeSet {
    levels: Vec<&'static str>,
}

impl SizeSet {
    /// Build a set from ordered tokens; fewer than two levels leaves nothing
    /// to transition between and is rejected.
    pub fn new(levels: Vec<&'static str>) -> Result<Self, ConfigError> {
        if levels.len() < 2 {
            return Err(ConfigError::TooFewSizes(levels.len()));
        }
        Ok(Self { levels })
    }

    /// The standard three-level set most widgets use.
    pub fn three_level() -> Self {
        Self {
            levels: vec!["small", "medium", "large"],
        }
    }

    /// The extended four-level set for widgets with an extra-large layout.
    pub fn four_level() -> Self {
        Self {
            levels: vec!["small", "medium", "large", "x-large"],
        }
    }

    /// Whether `token` is a member of this set.
    pub fn contains(
        &self,
        token: &str,
    ) -> bool {
        self.levels.iter().any(|level| *level == token)
    }

    /// The tokens in order, smallest first.
    pub fn levels(&self) -> &[&'static str] {
        &self.levels
    }
}

// =============================================================================
// WidgetSizeController
// =============================================================================

/// Per-widget size state with validated transitions and write-through
/// persistence.
pub struct WidgetSizeController {
    widget_id: &'static str,
    sizes: SizeSet,
    current: String,
    store: Rc<dyn SizeStore>,
}

impl WidgetSizeController {
    /// Create a controller, recovering any stored preference.
    ///
    /// `default` must be a member of `sizes`. A stored token outside the set
    /// (stale data from an older layout) is ignored in favor of the default.
    /// Construction never writes: the store only changes on an accepted
    /// transition.
    pub fn new(
        widget_id: &'static str,
        sizes: SizeSet,
        default: &str,
        store: Rc<dyn SizeStore>,
    ) -> Result<Self, ConfigError> {
        if !sizes.contains(default) {
            return Err(ConfigError::UnknownDefaultSize(default.to_string()));
        }
        let current = store
            .get(widget_id)
            .filter(|stored| sizes.contains(stored))
            .unwrap_or_else(|| default.to_string());
        Ok(Self {
            widget_id,
            sizes,
            current,
            store,
        })
    }

    /// The widget's current size token.
    pub fn size(&self) -> &str {
        &self.current
    }

    /// The widget this controller belongs to.
    pub const fn widget_id(&self) -> &'static str {
        self.widget_id
    }

    /// The set of tokens this widget accepts.
    pub const fn sizes(&self) -> &SizeSet {
        &self.sizes
    }

    /// Transition to `size`, persisting on acceptance.
    ///
    /// Tokens outside the widget's set are rejected (state and store
    /// untouched) and reported as `false`.
    pub fn set_size(
        &mut self,
        size: &str,
    ) -> bool {
        if !self.sizes.contains(size) {
            tracing::debug!(
                widget = self.widget_id,
                size,
                "ignoring transition to size outside the widget's set"
            );
            return false;
        }
        self.current = size.to_string();
        self.store.set(self.widget_id, size);
        true
    }
}

// The store handle is a trait object without Debug, so it is skipped.
impl fmt::Debug for WidgetSizeController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WidgetSizeController")
            .field("widget_id", &self.widget_id)
            .field("sizes", &self.sizes)
            .field("current", &self.current)
            .finish_non_exhaustive()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[test]
    fn test_size_set_needs_two_levels() {
        assert_eq!(SizeSet::new(vec!["only"]).unwrap_err(), ConfigError::TooFewSizes(1));
        assert_eq!(SizeSet::new(vec![]).unwrap_err(), ConfigError::TooFewSizes(0));
    }

    #[test]
    fn test_preset_levels() {
        assert_eq!(SizeSet::three_level().levels(), ["small", "medium", "large"]);
        assert_eq!(
            SizeSet::four_level().levels(),
            ["small", "medium", "large", "x-large"]
        );
    }

    #[test]
    fn test_controller_is_debug_printable() {
        let store = Rc::new(MemoryStore::new());
        let controller =
            WidgetSizeController::new("battery", SizeSet::three_level(), "small", store).unwrap();
        let rendered = format!("{controller:?}");
        assert!(rendered.contains("widget_id: \"battery\""));
        assert!(rendered.contains("current: \"small\""));
    }

    #[test]
    fn test_default_must_be_in_set() {
        let store = Rc::new(MemoryStore::new());
        let err = WidgetSizeController::new("battery", SizeSet::three_level(), "x-large", store)
            .unwrap_err();
        assert_eq!(err, ConfigError::UnknownDefaultSize("x-large".to_string()));
    }

    #[test]
    fn test_fresh_controller_uses_default_without_writing() {
        let store = Rc::new(MemoryStore::new());
        let controller =
            WidgetSizeController::new("battery", SizeSet::three_level(), "small", store.clone())
                .unwrap();
        assert_eq!(controller.size(), "small");
        assert_eq!(store.get("battery"), None, "Construction must not write the default");
    }

    #[test]
    fn test_set_size_accepts_member_and_persists() {
        let store = Rc::new(MemoryStore::new());
        let mut controller =
            WidgetSizeController::new("battery", SizeSet::three_level(), "small", store.clone())
                .unwrap();
        assert!(controller.set_size("large"));
        assert_eq!(controller.size(), "large");
        assert_eq!(store.get("battery"), Some("large".to_string()), "Accepted sizes write through");
    }

    #[test]
    fn test_set_size_rejects_non_member() {
        let store = Rc::new(MemoryStore::new());
        let mut controller =
            WidgetSizeController::new("battery", SizeSet::three_level(), "small", store.clone())
                .unwrap();
        assert!(!controller.set_size("x-large"), "Three-level widget has no x-large");
        assert_eq!(controller.size(), "small", "Rejected transition leaves state untouched");
        assert_eq!(store.get("battery"), None, "Rejected transition leaves store untouched");
    }

    #[test]
    fn test_stored_preference_recovered_on_construction() {
        let store = Rc::new(MemoryStore::new());
        {
            let mut controller = WidgetSizeController::new(
                "battery",
                SizeSet::three_level(),
                "small",
                store.clone(),
            )
            .unwrap();
            controller.set_size("large");
        }
        // A fresh controller over the same store reports the stored choice.
        let recovered =
            WidgetSizeController::new("battery", SizeSet::three_level(), "small", store).unwrap();
        assert_eq!(recovered.size(), "large");
    }

    #[test]
    fn test_stale_stored_token_falls_back_to_default() {
        let store = Rc::new(MemoryStore::new());
        store.set("battery", "gigantic");
        let controller =
            WidgetSizeController::new("battery", SizeSet::three_level(), "medium", store).unwrap();
        assert_eq!(controller.size(), "medium", "Unknown stored token must not poison the layout");
    }

    #[test]
    fn test_controllers_for_distinct_widgets_are_independent() {
        let store = Rc::new(MemoryStore::new());
        let mut battery =
            WidgetSizeController::new("battery", SizeSet::three_level(), "small", store.clone())
                .unwrap();
        let mut speed =
            WidgetSizeController::new("speed", SizeSet::three_level(), "small", store.clone())
                .unwrap();
        battery.set_size("large");
        speed.set_size("medium");
        assert_eq!(store.get("battery"), Some("large".to_string()));
        assert_eq!(store.get("speed"), Some("medium".to_string()));
    }
}
