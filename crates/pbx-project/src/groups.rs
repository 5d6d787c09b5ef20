use pbx_store::{PBXGroup, PBXObject};
use pbx_types::Reference;
use tracing::{debug, warn};

use crate::error::ProjectResult;
use crate::project::Project;

impl Project {
    /// Walk or create the group chain for a slash-separated path under `parent`.
    ///
    /// Each component reuses a child group matched by
    /// [`group_named`](pbx_store::ObjectStore::group_named) or creates a new
    /// `<group>`-relative one and appends it to the current group's children.
    /// With `without_folder`, new groups get a name but no path.
    ///
    /// Returns one `(reference, group)` pair per component, in path order,
    /// reflecting the groups' state after the call. Empty components are
    /// skipped, so an empty path returns an empty list and changes nothing.
    /// A `parent` that is not a group also yields an empty list.
    pub fn add_group_path(
        &mut self,
        path: &str,
        parent: &Reference,
        without_folder: bool,
    ) -> ProjectResult<Vec<(Reference, PBXGroup)>> {
        if self.store.group(parent).is_none() {
            warn!(parent = %parent, path, "parent is not a group; nothing added");
            return Ok(Vec::new());
        }

        let mut chain = Vec::new();
        let mut current = parent.clone();
        for component in path.split('/').filter(|component| !component.is_empty()) {
            let existing = self
                .store
                .group(&current)
                .and_then(|group| self.store.group_named(component, group))
                .map(|(reference, _)| reference.clone());

            let next = match existing {
                Some(reference) => {
                    debug!(group = %reference, component, "reusing group");
                    reference
                }
                None => {
                    let folder = (!without_folder).then(|| component.to_string());
                    let group = PBXGroup::new(Some(component.to_string()), folder);
                    let reference = self.create(PBXObject::Group(group), component)?;
                    if let Some(current_group) = self.store.group_mut(&current) {
                        current_group.children.push(reference.clone());
                    }
                    debug!(group = %reference, parent = %current, component, "created group");
                    reference
                }
            };
            chain.push(next.clone());
            current = next;
        }

        Ok(chain
            .into_iter()
            .filter_map(|reference| {
                let group = self.store.group(&reference)?.clone();
                Some((reference, group))
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ProjectConfig;
    use pbx_store::ObjectStore;
    use proptest::prelude::*;

    fn session() -> (Project, Reference) {
        let project = Project::init("Demo", ProjectConfig::default()).unwrap();
        let main = project.main_group().unwrap().clone();
        (project, main)
    }

    fn bare_root() -> (Project, Reference) {
        let mut store = ObjectStore::new();
        let root = Reference::new("ROOT").unwrap();
        store
            .insert(root.clone(), PBXObject::Group(PBXGroup::default()))
            .unwrap();
        (Project::open(store, ProjectConfig::default()), root)
    }

    #[test]
    fn creates_chain_of_three() {
        let (mut project, root) = bare_root();
        let before = project.store().len();
        let chain = project.add_group_path("A/B/C", &root, false).unwrap();
        assert_eq!(project.store().len(), before + 3);
        assert_eq!(chain.len(), 3);

        let names: Vec<_> = chain
            .iter()
            .map(|(_, group)| group.name.as_deref().unwrap())
            .collect();
        assert_eq!(names, vec!["A", "B", "C"]);

        let root_group = project.store().group(&root).unwrap();
        assert_eq!(root_group.children, vec![chain[0].0.clone()]);
        assert_eq!(chain[0].1.children, vec![chain[1].0.clone()]);
        assert_eq!(chain[1].1.children, vec![chain[2].0.clone()]);
        assert!(chain[2].1.children.is_empty());
        assert_eq!(chain[0].1.path.as_deref(), Some("A"));
    }

    #[test]
    fn second_call_reuses_everything() {
        let (mut project, root) = bare_root();
        let first = project.add_group_path("A/B/C", &root, false).unwrap();
        let count = project.store().len();
        let second = project.add_group_path("A/B/C", &root, false).unwrap();
        assert_eq!(project.store().len(), count);
        assert_eq!(first, second);
    }

    #[test]
    fn sources_models_scenario() {
        let (mut project, root) = bare_root();
        let chain = project.add_group_path("Sources/Models", &root, false).unwrap();
        assert_eq!(project.store().groups().len(), 3);
        let (sources, models) = (&chain[0], &chain[1]);
        assert_eq!(
            project.store().group(&root).unwrap().children,
            vec![sources.0.clone()]
        );
        assert_eq!(sources.1.children, vec![models.0.clone()]);
    }

    #[test]
    fn without_folder_leaves_path_unset() {
        let (mut project, main) = session();
        let chain = project.add_group_path("Support/Files", &main, true).unwrap();
        for (_, group) in &chain {
            assert!(group.path.is_none());
            assert!(group.name.is_some());
        }
    }

    #[test]
    fn partial_reuse_extends_existing_chain() {
        let (mut project, main) = session();
        let first = project.add_group_path("App/Views", &main, false).unwrap();
        let second = project.add_group_path("App/Models", &main, false).unwrap();
        assert_eq!(first[0].0, second[0].0);
        assert_ne!(first[1].0, second[1].0);
        assert_eq!(second[0].1.children, vec![first[1].0.clone(), second[1].0.clone()]);
    }

    #[test]
    fn existing_group_matched_by_path() {
        let (mut project, root) = bare_root();
        let chain = project.add_group_path("Lib", &root, false).unwrap();
        // Rename the group; its path still matches.
        let lib = chain[0].0.clone();
        project.store.group_mut(&lib).unwrap().name = Some("Library".into());
        let again = project.add_group_path("Lib", &root, false).unwrap();
        assert_eq!(again[0].0, lib);
    }

    #[test]
    fn empty_path_is_a_no_op() {
        let (mut project, root) = bare_root();
        let before = project.store().clone();
        assert!(project.add_group_path("", &root, false).unwrap().is_empty());
        assert_eq!(project.store(), &before);
    }

    #[test]
    fn empty_components_are_skipped() {
        let (mut project, root) = bare_root();
        let chain = project.add_group_path("/A//B/", &root, false).unwrap();
        assert_eq!(chain.len(), 2);
    }

    #[test]
    fn non_group_parent_yields_nothing() {
        let (mut project, _) = bare_root();
        let missing = Reference::new("NOPE").unwrap();
        assert!(project.add_group_path("A", &missing, false).unwrap().is_empty());
        assert_eq!(project.store().len(), 1);
    }

    #[test]
    fn same_name_under_different_parents_gets_distinct_references() {
        let (mut project, root) = bare_root();
        let a = project.add_group_path("A/Common", &root, false).unwrap();
        let b = project.add_group_path("B/Common", &root, false).unwrap();
        assert_ne!(a[1].0, b[1].0);
    }

    proptest! {
        #[test]
        fn add_group_path_is_idempotent(parts in proptest::collection::vec("[A-Za-z]{1,6}", 1..5)) {
            let (mut project, root) = bare_root();
            let path = parts.join("/");
            let first = project.add_group_path(&path, &root, false).unwrap();
            let count = project.store().len();
            let second = project.add_group_path(&path, &root, false).unwrap();
            prop_assert_eq!(first.len(), parts.len());
            prop_assert_eq!(project.store().len(), count);
            prop_assert_eq!(first, second);
        }
    }
}
