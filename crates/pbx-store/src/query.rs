//! Read-only graph traversal over an [`ObjectStore`].
//!
//! Nothing here mutates the store, and "nothing found" is always an empty
//! result or `None`, never an error.

use pbx_types::Reference;

use crate::object::{
    BuildPhaseKind, FileElement, PBXBuildFile, PBXFileReference, PBXGroup, PBXProject, PBXTarget,
    TargetKind,
};
use crate::store::ObjectStore;

/// The record that owns a configuration list.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ListOwner<'a> {
    Project(&'a Reference, &'a PBXProject),
    Target(&'a Reference, &'a PBXTarget),
}

impl ObjectStore {
    /// All targets: native, then legacy, then aggregate, each in insertion order.
    pub fn targets(&self) -> impl Iterator<Item = (&Reference, &PBXTarget)> {
        self.targets_of(TargetKind::Native)
            .iter()
            .chain(self.targets_of(TargetKind::Legacy))
            .chain(self.targets_of(TargetKind::Aggregate))
    }

    /// Targets whose name matches exactly, in [`ObjectStore::targets`] order.
    pub fn targets_named(&self, name: &str) -> Vec<(&Reference, &PBXTarget)> {
        self.targets()
            .filter(|(_, target)| target.name == name)
            .collect()
    }

    /// The target's sources build phase.
    ///
    /// "First" follows the sources partition's insertion order, not the
    /// order of `target.build_phases`.
    pub fn sources_build_phase(&self, target: &PBXTarget) -> Option<&Reference> {
        self.phases_of(BuildPhaseKind::Sources)
            .keys()
            .find(|reference| target.build_phases.contains(reference))
    }

    /// File elements compiled by the target, in sources-phase order.
    ///
    /// Build files or file references that do not resolve are skipped.
    pub fn source_files(&self, target: &PBXTarget) -> Vec<(&Reference, FileElement<'_>)> {
        let Some(phase) = self
            .sources_build_phase(target)
            .and_then(|reference| self.build_phase(reference))
        else {
            return Vec::new();
        };
        phase
            .files
            .iter()
            .filter_map(|build_file| self.build_file(build_file)?.file_ref.as_ref())
            .filter_map(|file_ref| {
                self.file_element(file_ref)
                    .map(|element| (file_ref, element))
            })
            .collect()
    }

    /// A child group of `parent` whose name or path equals `name`.
    ///
    /// Candidates are scanned once, in group partition order; the first
    /// satisfying either condition wins.
    pub fn group_named(&self, name: &str, parent: &PBXGroup) -> Option<(&Reference, &PBXGroup)> {
        self.groups().iter().find(|(reference, group)| {
            parent.children.contains(reference)
                && (group.name.as_deref() == Some(name) || group.path.as_deref() == Some(name))
        })
    }

    /// Name of a build configuration.
    pub fn configuration_name(&self, reference: &Reference) -> Option<&str> {
        self.build_configuration(reference)
            .map(|configuration| configuration.name.as_str())
    }

    /// Configuration names of a configuration list, in list order.
    pub fn configurations_of(&self, list: &Reference) -> Vec<&str> {
        self.configuration_list(list)
            .map(|list| {
                list.build_configurations
                    .iter()
                    .filter_map(|reference| self.configuration_name(reference))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// The project or native target owning a configuration list.
    ///
    /// Projects are scanned first, then native targets. Legacy and aggregate
    /// targets are not searched.
    pub fn configuration_list_owner(&self, list: &Reference) -> Option<ListOwner<'_>> {
        if let Some((reference, project)) = self
            .projects()
            .iter()
            .find(|(_, project)| &project.build_configuration_list == list)
        {
            return Some(ListOwner::Project(reference, project));
        }
        self.targets_of(TargetKind::Native)
            .iter()
            .find(|(_, target)| &target.build_configuration_list == list)
            .map(|(reference, target)| ListOwner::Target(reference, target))
    }

    /// The file reference registered for a path, if any.
    pub fn file_reference_by_path(&self, path: &str) -> Option<(&Reference, &PBXFileReference)> {
        self.file_references()
            .iter()
            .find(|(_, file)| file.path == path)
    }

    /// The first build file pointing at `file_ref`, across all phases.
    pub fn build_file_for(&self, file_ref: &Reference) -> Option<(&Reference, &PBXBuildFile)> {
        self.build_files()
            .iter()
            .find(|(_, build_file)| build_file.file_ref.as_ref() == Some(file_ref))
    }

    /// Kind of each entry of `target.build_phases`, in that order.
    pub fn build_phase_kinds<'a>(
        &'a self,
        target: &'a PBXTarget,
    ) -> Vec<(&'a Reference, BuildPhaseKind)> {
        target
            .build_phases
            .iter()
            .filter_map(|reference| Some((reference, self.phase_kind_of_phase(reference)?)))
            .collect()
    }
}
