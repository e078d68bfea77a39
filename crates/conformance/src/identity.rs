//! Resource identifier access.
//!
//! Scenario functions need a resource's identifier to build instance URLs
//! (`/{path}/{id}`). Tested resource types declare that capability explicitly
//! by implementing [`Identified`].

/// Access to a resource's identifier.
///
/// Returns `None` when the resource has no identifier or the identifier is
/// not yet assigned. Implementations must never panic.
///
/// # Example
///
/// ```rust
/// use restcheck_conformance::Identified;
///
/// struct Widget {
///     code: Option<String>,
/// }
///
/// impl Identified for Widget {
///     fn id(&self) -> Option<String> {
///         self.code.clone()
///     }
/// }
/// ```
pub trait Identified {
    /// Returns the resource identifier, if one is present.
    fn id(&self) -> Option<String>;
}

impl<T: Identified> Identified for &T {
    fn id(&self) -> Option<String> {
        (*self).id()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Plain {
        id: String,
    }

    impl Identified for Plain {
        fn id(&self) -> Option<String> {
            Some(self.id.clone())
        }
    }

    struct Anonymous;

    impl Identified for Anonymous {
        fn id(&self) -> Option<String> {
            None
        }
    }

    #[test]
    fn test_identifier_present() {
        let resource = Plain {
            id: "widget-1".to_string(),
        };
        assert_eq!(resource.id(), Some("widget-1".to_string()));
    }

    #[test]
    fn test_identifier_absent() {
        assert_eq!(Anonymous.id(), None);
    }

    #[test]
    fn test_identifier_through_reference() {
        let resource = Plain {
            id: "widget-2".to_string(),
        };
        let by_ref: &Plain = &resource;
        assert_eq!(by_ref.id(), Some("widget-2".to_string()));
    }
}
