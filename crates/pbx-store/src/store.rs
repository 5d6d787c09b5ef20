use std::collections::HashMap;

use indexmap::IndexMap;
use pbx_types::Reference;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{StoreError, StoreResult};
use crate::object::{
    BuildPhaseKind, FileElement, ObjectKind, PBXBuildFile, PBXBuildPhase, PBXFileReference,
    PBXGroup, PBXObject, PBXProject, PBXTarget, TargetKind, XCBuildConfiguration,
    XCConfigurationList,
};

/// Insertion-ordered partition of one record kind.
pub type Partition<T> = IndexMap<Reference, T>;

/// Partitioned, in-memory store of every record in one project graph.
///
/// Each record kind has its own insertion-ordered partition; a global kind
/// index guarantees that a reference appears in at most one partition. The
/// store never deletes records, so references stay valid for its lifetime.
///
/// There is no internal locking: one editing session owns the store.
#[derive(Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(into = "StoreSnapshot", try_from = "StoreSnapshot")]
pub struct ObjectStore {
    kinds: HashMap<Reference, ObjectKind>,
    native_targets: Partition<PBXTarget>,
    legacy_targets: Partition<PBXTarget>,
    aggregate_targets: Partition<PBXTarget>,
    groups: Partition<PBXGroup>,
    file_references: Partition<PBXFileReference>,
    build_files: Partition<PBXBuildFile>,
    build_configurations: Partition<XCBuildConfiguration>,
    configuration_lists: Partition<XCConfigurationList>,
    projects: Partition<PBXProject>,
    build_phases: [Partition<PBXBuildPhase>; 7],
}

impl ObjectStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records across all partitions.
    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    /// Returns `true` if the store holds no records.
    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }

    /// Whether any partition holds this reference.
    pub fn contains(&self, reference: &Reference) -> bool {
        self.kinds.contains_key(reference)
    }

    /// The partition holding this reference.
    pub fn kind_of(&self, reference: &Reference) -> Option<ObjectKind> {
        self.kinds.get(reference).copied()
    }

    /// Insert a record under a fresh reference.
    ///
    /// Fails if the reference already names a record in any partition;
    /// the store is left unchanged in that case.
    pub fn insert(&mut self, reference: Reference, object: PBXObject) -> StoreResult<()> {
        if let Some(existing) = self.kind_of(&reference) {
            return Err(StoreError::DuplicateReference {
                reference,
                existing,
            });
        }
        let kind = object.kind();
        debug!(reference = %reference, kind = %kind, "inserting object");
        self.kinds.insert(reference.clone(), kind);
        match object {
            PBXObject::Target(target) => {
                self.targets_of_mut(target.kind()).insert(reference, target);
            }
            PBXObject::Group(group) => {
                self.groups.insert(reference, group);
            }
            PBXObject::FileReference(file) => {
                self.file_references.insert(reference, file);
            }
            PBXObject::BuildFile(build_file) => {
                self.build_files.insert(reference, build_file);
            }
            PBXObject::BuildPhase(phase) => {
                self.build_phases[phase.kind().index()].insert(reference, phase);
            }
            PBXObject::BuildConfiguration(configuration) => {
                self.build_configurations.insert(reference, configuration);
            }
            PBXObject::ConfigurationList(list) => {
                self.configuration_lists.insert(reference, list);
            }
            PBXObject::Project(project) => {
                self.projects.insert(reference, project);
            }
        }
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Partitions
    // -----------------------------------------------------------------------

    /// Targets of one variant, in insertion order.
    pub fn targets_of(&self, kind: TargetKind) -> &Partition<PBXTarget> {
        match kind {
            TargetKind::Native => &self.native_targets,
            TargetKind::Legacy => &self.legacy_targets,
            TargetKind::Aggregate => &self.aggregate_targets,
        }
    }

    fn targets_of_mut(&mut self, kind: TargetKind) -> &mut Partition<PBXTarget> {
        match kind {
            TargetKind::Native => &mut self.native_targets,
            TargetKind::Legacy => &mut self.legacy_targets,
            TargetKind::Aggregate => &mut self.aggregate_targets,
        }
    }

    /// Build phases of one kind, in insertion order.
    pub fn phases_of(&self, kind: BuildPhaseKind) -> &Partition<PBXBuildPhase> {
        &self.build_phases[kind.index()]
    }

    pub fn groups(&self) -> &Partition<PBXGroup> {
        &self.groups
    }

    pub fn file_references(&self) -> &Partition<PBXFileReference> {
        &self.file_references
    }

    pub fn build_files(&self) -> &Partition<PBXBuildFile> {
        &self.build_files
    }

    pub fn build_configurations(&self) -> &Partition<XCBuildConfiguration> {
        &self.build_configurations
    }

    pub fn configuration_lists(&self) -> &Partition<XCConfigurationList> {
        &self.configuration_lists
    }

    pub fn projects(&self) -> &Partition<PBXProject> {
        &self.projects
    }

    // -----------------------------------------------------------------------
    // Typed lookups
    // -----------------------------------------------------------------------

    pub fn target(&self, reference: &Reference) -> Option<&PBXTarget> {
        match self.kind_of(reference)? {
            ObjectKind::NativeTarget => self.native_targets.get(reference),
            ObjectKind::LegacyTarget => self.legacy_targets.get(reference),
            ObjectKind::AggregateTarget => self.aggregate_targets.get(reference),
            _ => None,
        }
    }

    pub fn group(&self, reference: &Reference) -> Option<&PBXGroup> {
        self.groups.get(reference)
    }

    pub fn group_mut(&mut self, reference: &Reference) -> Option<&mut PBXGroup> {
        self.groups.get_mut(reference)
    }

    pub fn file_reference(&self, reference: &Reference) -> Option<&PBXFileReference> {
        self.file_references.get(reference)
    }

    /// Resolve a reference to a group or a file reference.
    pub fn file_element(&self, reference: &Reference) -> Option<FileElement<'_>> {
        match self.kind_of(reference)? {
            ObjectKind::Group => self.groups.get(reference).map(FileElement::Group),
            ObjectKind::FileReference => self
                .file_references
                .get(reference)
                .map(FileElement::FileReference),
            _ => None,
        }
    }

    pub fn build_file(&self, reference: &Reference) -> Option<&PBXBuildFile> {
        self.build_files.get(reference)
    }

    pub fn build_phase(&self, reference: &Reference) -> Option<&PBXBuildPhase> {
        match self.kind_of(reference)? {
            ObjectKind::BuildPhase(kind) => self.build_phases[kind.index()].get(reference),
            _ => None,
        }
    }

    /// Mutable access to a phase's `files` list.
    ///
    /// Only the list is exposed so a phase cannot change kind in place.
    pub fn phase_files_mut(&mut self, reference: &Reference) -> Option<&mut Vec<Reference>> {
        match self.kind_of(reference)? {
            ObjectKind::BuildPhase(kind) => self.build_phases[kind.index()]
                .get_mut(reference)
                .map(|phase| &mut phase.files),
            _ => None,
        }
    }

    pub fn build_configuration(&self, reference: &Reference) -> Option<&XCBuildConfiguration> {
        self.build_configurations.get(reference)
    }

    pub fn configuration_list(&self, reference: &Reference) -> Option<&XCConfigurationList> {
        self.configuration_lists.get(reference)
    }

    /// The first project record, if any.
    pub fn project(&self) -> Option<(&Reference, &PBXProject)> {
        self.projects.first()
    }

    pub fn project_mut(&mut self, reference: &Reference) -> Option<&mut PBXProject> {
        self.projects.get_mut(reference)
    }
}

impl std::fmt::Debug for ObjectStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObjectStore")
            .field("object_count", &self.len())
            .field(
                "targets",
                &(self.native_targets.len()
                    + self.legacy_targets.len()
                    + self.aggregate_targets.len()),
            )
            .field("groups", &self.groups.len())
            .field("file_references", &self.file_references.len())
            .field("build_files", &self.build_files.len())
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Snapshot
// ---------------------------------------------------------------------------

/// Serialized form of an [`ObjectStore`]: one ordered map per partition.
///
/// Decoding replays every record through [`ObjectStore::insert`], so a
/// snapshot that names one reference twice is rejected.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct StoreSnapshot {
    #[serde(default)]
    pub projects: Partition<PBXProject>,
    #[serde(default)]
    pub targets: Partition<PBXTarget>,
    #[serde(default)]
    pub groups: Partition<PBXGroup>,
    #[serde(default)]
    pub file_references: Partition<PBXFileReference>,
    #[serde(default)]
    pub build_files: Partition<PBXBuildFile>,
    #[serde(default)]
    pub build_phases: Partition<PBXBuildPhase>,
    #[serde(default)]
    pub build_configurations: Partition<XCBuildConfiguration>,
    #[serde(default)]
    pub configuration_lists: Partition<XCConfigurationList>,
}

impl From<ObjectStore> for StoreSnapshot {
    fn from(store: ObjectStore) -> Self {
        let ObjectStore {
            native_targets,
            legacy_targets,
            aggregate_targets,
            groups,
            file_references,
            build_files,
            build_configurations,
            configuration_lists,
            projects,
            build_phases,
            ..
        } = store;
        Self {
            projects,
            targets: native_targets
                .into_iter()
                .chain(legacy_targets)
                .chain(aggregate_targets)
                .collect(),
            groups,
            file_references,
            build_files,
            build_phases: build_phases.into_iter().flatten().collect(),
            build_configurations,
            configuration_lists,
        }
    }
}

impl TryFrom<StoreSnapshot> for ObjectStore {
    type Error = StoreError;

    fn try_from(snapshot: StoreSnapshot) -> StoreResult<Self> {
        let mut store = ObjectStore::new();
        let StoreSnapshot {
            projects,
            targets,
            groups,
            file_references,
            build_files,
            build_phases,
            build_configurations,
            configuration_lists,
        } = snapshot;
        let records = projects
            .into_iter()
            .map(|(r, o)| (r, PBXObject::Project(o)))
            .chain(targets.into_iter().map(|(r, o)| (r, PBXObject::Target(o))))
            .chain(groups.into_iter().map(|(r, o)| (r, PBXObject::Group(o))))
            .chain(
                file_references
                    .into_iter()
                    .map(|(r, o)| (r, PBXObject::FileReference(o))),
            )
            .chain(build_files.into_iter().map(|(r, o)| (r, PBXObject::BuildFile(o))))
            .chain(build_phases.into_iter().map(|(r, o)| (r, PBXObject::BuildPhase(o))))
            .chain(
                build_configurations
                    .into_iter()
                    .map(|(r, o)| (r, PBXObject::BuildConfiguration(o))),
            )
            .chain(
                configuration_lists
                    .into_iter()
                    .map(|(r, o)| (r, PBXObject::ConfigurationList(o))),
            );
        for (reference, object) in records {
            store.insert(reference, object)?;
        }
        Ok(store)
    }
}

impl ObjectStore {
    /// Encode the store as pretty-printed JSON.
    pub fn to_json(&self) -> StoreResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| StoreError::Serialization(e.to_string()))
    }

    /// Decode a store from JSON produced by [`ObjectStore::to_json`].
    pub fn from_json(json: &str) -> StoreResult<Self> {
        serde_json::from_str(json).map_err(|e| StoreError::Serialization(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::*;

    fn r(token: &str) -> Reference {
        Reference::new(token).unwrap()
    }

    fn file(path: &str) -> PBXObject {
        PBXObject::FileReference(PBXFileReference {
            name: None,
            path: path.into(),
            source_tree: Default::default(),
            explicit_file_type: None,
            last_known_file_type: None,
        })
    }

    // -----------------------------------------------------------------------
    // Insert and lookup
    // -----------------------------------------------------------------------

    #[test]
    fn insert_and_lookup_group() {
        let mut store = ObjectStore::new();
        store
            .insert(r("G1"), PBXObject::Group(PBXGroup::new(Some("A".into()), None)))
            .unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(store.kind_of(&r("G1")), Some(ObjectKind::Group));
        assert_eq!(store.group(&r("G1")).unwrap().name.as_deref(), Some("A"));
    }

    #[test]
    fn targets_route_to_their_variant_partition() {
        let mut store = ObjectStore::new();
        store
            .insert(r("T1"), PBXObject::Target(PBXTarget::new(TargetKind::Legacy, "Make", r("L1"))))
            .unwrap();
        assert!(store.targets_of(TargetKind::Native).is_empty());
        assert_eq!(store.targets_of(TargetKind::Legacy).len(), 1);
        assert_eq!(store.target(&r("T1")).unwrap().name, "Make");
    }

    #[test]
    fn phases_route_to_their_kind_partition() {
        let mut store = ObjectStore::new();
        store
            .insert(r("P1"), PBXObject::BuildPhase(PBXBuildPhase::new(BuildPhaseKind::Headers)))
            .unwrap();
        assert_eq!(store.phases_of(BuildPhaseKind::Headers).len(), 1);
        assert!(store.phases_of(BuildPhaseKind::Sources).is_empty());
        assert_eq!(
            store.kind_of(&r("P1")),
            Some(ObjectKind::BuildPhase(BuildPhaseKind::Headers))
        );
    }

    #[test]
    fn duplicate_reference_is_rejected_across_partitions() {
        let mut store = ObjectStore::new();
        store.insert(r("X"), file("/a")).unwrap();
        let err = store
            .insert(r("X"), PBXObject::Group(PBXGroup::default()))
            .unwrap_err();
        assert!(matches!(
            err,
            StoreError::DuplicateReference { existing: ObjectKind::FileReference, .. }
        ));
        assert_eq!(store.len(), 1);
        assert!(store.group(&r("X")).is_none());
    }

    #[test]
    fn typed_lookup_of_wrong_kind_is_none() {
        let mut store = ObjectStore::new();
        store.insert(r("F"), file("/a")).unwrap();
        assert!(store.target(&r("F")).is_none());
        assert!(store.build_phase(&r("F")).is_none());
        assert!(store.file_element(&r("F")).is_some());
        assert!(store.file_element(&r("missing")).is_none());
    }

    #[test]
    fn partitions_preserve_insertion_order() {
        let mut store = ObjectStore::new();
        for token in ["Z", "A", "M"] {
            store.insert(r(token), file(&format!("/{token}"))).unwrap();
        }
        let order: Vec<_> = store.file_references().keys().map(Reference::as_str).collect();
        assert_eq!(order, vec!["Z", "A", "M"]);
    }

    #[test]
    fn empty_store() {
        let store = ObjectStore::default();
        assert!(store.is_empty());
        assert!(store.project().is_none());
    }

    // -----------------------------------------------------------------------
    // Snapshot
    // -----------------------------------------------------------------------

    #[test]
    fn json_roundtrip_keeps_partitions_and_order() {
        let mut store = ObjectStore::new();
        store.insert(r("F2"), file("/b")).unwrap();
        store.insert(r("F1"), file("/a")).unwrap();
        store
            .insert(r("P"), PBXObject::BuildPhase(PBXBuildPhase::new(BuildPhaseKind::Sources)))
            .unwrap();
        store
            .insert(r("T"), PBXObject::Target(PBXTarget::new(TargetKind::Aggregate, "All", r("L"))))
            .unwrap();

        let json = store.to_json().unwrap();
        let decoded = ObjectStore::from_json(&json).unwrap();
        assert_eq!(decoded, store);
        let order: Vec<_> = decoded.file_references().keys().map(Reference::as_str).collect();
        assert_eq!(order, vec!["F2", "F1"]);
        assert_eq!(decoded.kind_of(&r("T")), Some(ObjectKind::AggregateTarget));
    }

    #[test]
    fn snapshot_with_shared_reference_is_rejected() {
        let json = r#"{
            "groups": { "X": { "children": [], "name": null, "path": null, "source_tree": "group" } },
            "file_references": { "X": { "name": null, "path": "/a", "source_tree": "group",
                                        "explicit_file_type": null, "last_known_file_type": null } }
        }"#;
        let err = ObjectStore::from_json(json).unwrap_err();
        assert!(matches!(err, StoreError::Serialization(_)));
    }

    #[test]
    fn debug_format() {
        let store = ObjectStore::new();
        let debug = format!("{store:?}");
        assert!(debug.contains("ObjectStore"));
        assert!(debug.contains("object_count"));
    }
}
