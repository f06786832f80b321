use std::path::PathBuf;

/// Everything a host reports at menu-invocation time: the explicitly
/// selected entries, in host order, and the folder the menu was invoked
/// within. Built once per invocation and read-only afterwards.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectionContext {
    /// Selected filesystem entries; may be empty, may mix files and
    /// directories.
    pub selected: Vec<PathBuf>,
    /// The targeted container, when the host knows one.
    pub container: Option<PathBuf>,
}

/// Seam between the core and a concrete host. Implementations adapt
/// whatever the file manager hands over (a shell item array, Finder's
/// selection, CLI arguments) so the resolution and launch logic never sees
/// host types.
pub trait SelectionProvider {
    fn selected_items(&self) -> Vec<PathBuf>;
    fn targeted_container(&self) -> Option<PathBuf>;
}

impl SelectionContext {
    pub fn new(selected: Vec<PathBuf>, container: Option<PathBuf>) -> Self {
        Self {
            selected,
            container,
        }
    }

    /// Normalize a host's selection data. An empty or absent selection is
    /// a valid context, not an error.
    pub fn from_provider(provider: &dyn SelectionProvider) -> Self {
        Self::new(provider.selected_items(), provider.targeted_container())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FakeHost {
        selected: Vec<PathBuf>,
        container: Option<PathBuf>,
    }

    impl SelectionProvider for FakeHost {
        fn selected_items(&self) -> Vec<PathBuf> {
            self.selected.clone()
        }

        fn targeted_container(&self) -> Option<PathBuf> {
            self.container.clone()
        }
    }

    #[test]
    fn provider_data_is_taken_in_order() {
        let host = FakeHost {
            selected: vec![PathBuf::from("/b"), PathBuf::from("/a")],
            container: Some(PathBuf::from("/c")),
        };
        let ctx = SelectionContext::from_provider(&host);
        assert_eq!(ctx.selected, vec![PathBuf::from("/b"), PathBuf::from("/a")]);
        assert_eq!(ctx.container.as_deref(), Some(std::path::Path::new("/c")));
    }

    #[test]
    fn empty_host_selection_is_a_valid_context() {
        let host = FakeHost {
            selected: vec![],
            container: None,
        };
        let ctx = SelectionContext::from_provider(&host);
        assert_eq!(ctx, SelectionContext::default());
    }
}
