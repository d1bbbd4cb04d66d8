//! The action registry: maps a named action to a keep/drop decision over
//! `(filter_result, value_found)`, plus the static `stored` flag that
//! decides row layout at compile time.

use crate::error::ConfigError;

/// Registry of actions. `apply` answers "keep this message?"; `stored`
/// answers "does this needle contribute an output field?" -- a static
/// property fixed at compile time, independent of any runtime decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Store,
    StoreTrue,
    DiscardFalse,
    DiscardTrue,
    StoreMeta,
}

impl Action {
    pub fn parse(s: &str) -> Result<Self, ConfigError> {
        match s {
            "store" => Ok(Action::Store),
            "store_true" => Ok(Action::StoreTrue),
            "discard_false" => Ok(Action::DiscardFalse),
            "discard_true" => Ok(Action::DiscardTrue),
            "store_meta" => Ok(Action::StoreMeta),
            other => Err(ConfigError::UnknownAction(other.to_string())),
        }
    }

    /// True iff this needle can contribute an output field -- a static
    /// property that fixes the compile-time `fields_count`. `DiscardFalse`
    /// shares `StoreTrue`'s keep logic (keep iff `filter_result`) and,
    /// like it, stores its value whenever the message survives; there is
    /// no "store_false" counterpart to pair with it. `DiscardTrue` has no
    /// stored counterpart at all -- it exists purely to gate the message
    /// on a field whose value should not itself appear in the row.
    pub fn stored(&self) -> bool {
        match self {
            Action::Store | Action::StoreTrue | Action::DiscardFalse | Action::StoreMeta => true,
            Action::DiscardTrue => false,
        }
    }

    /// Does this needle's action publish its value into message metadata?
    pub fn publishes_metadata(&self) -> bool {
        matches!(self, Action::StoreMeta)
    }

    /// Decide whether to keep processing this message, given the filter's
    /// verdict over the located value.
    pub fn keep(&self, filter_result: bool) -> bool {
        match self {
            Action::Store | Action::StoreMeta => true,
            Action::StoreTrue | Action::DiscardFalse => filter_result,
            Action::DiscardTrue => !filter_result,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_stored_flag() {
        assert!(Action::Store.stored());
        assert!(Action::StoreTrue.stored());
        assert!(Action::StoreMeta.stored());
        assert!(Action::DiscardFalse.stored());
        assert!(!Action::DiscardTrue.stored());
    }

    #[test]
    fn test_keep_decisions() {
        assert!(Action::Store.keep(false));
        assert!(Action::Store.keep(true));
        assert!(Action::StoreMeta.keep(false));

        assert!(Action::StoreTrue.keep(true));
        assert!(!Action::StoreTrue.keep(false));

        assert!(Action::DiscardFalse.keep(true));
        assert!(!Action::DiscardFalse.keep(false));

        assert!(Action::DiscardTrue.keep(false));
        assert!(!Action::DiscardTrue.keep(true));
    }

    #[test]
    fn test_publishes_metadata() {
        assert!(Action::StoreMeta.publishes_metadata());
        assert!(!Action::Store.publishes_metadata());
    }

    #[test]
    fn test_parse_unknown() {
        assert_eq!(
            Action::parse("bogus"),
            Err(ConfigError::UnknownAction("bogus".to_string()))
        );
    }
}
