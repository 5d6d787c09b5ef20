use std::path::Path;

use pbx_store::{PBXBuildFile, PBXFileReference, PBXObject};
use pbx_types::{Reference, SourceTree};
use tracing::{debug, warn};

use crate::error::{ProjectError, ProjectResult};
use crate::project::Project;

impl Project {
    /// Register a file on disk as a file reference.
    ///
    /// Fails with [`ProjectError::NotAFile`] unless `path` is an existing
    /// regular file, and with [`ProjectError::NonUtf8Path`] if the path is
    /// not valid UTF-8; the store is untouched in both cases. A path that is
    /// already registered returns the existing record unchanged.
    pub fn add_file(
        &mut self,
        path: impl AsRef<Path>,
    ) -> ProjectResult<(Reference, PBXFileReference)> {
        let path = path.as_ref();
        if !self.fs.is_file(path) {
            return Err(ProjectError::NotAFile(path.to_path_buf()));
        }

        let Some(path_text) = path.to_str().map(str::to_owned) else {
            return Err(ProjectError::NonUtf8Path(path.to_path_buf()));
        };
        if let Some((reference, file)) = self.store.file_reference_by_path(&path_text) {
            debug!(file = %reference, path = %path_text, "file already registered");
            return Ok((reference.clone(), file.clone()));
        }

        let file = PBXFileReference {
            name: path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned()),
            path: path_text.clone(),
            source_tree: SourceTree::Group,
            explicit_file_type: None,
            last_known_file_type: Some(self.classifier.classify(path)),
        };
        let reference = self.create(PBXObject::FileReference(file.clone()), &path_text)?;
        debug!(file = %reference, path = %path_text, "added file reference");
        Ok((reference, file))
    }

    /// Append `file_ref` to a group's children unless it is already there.
    ///
    /// Skipped when the group does not exist or `file_ref` does not resolve
    /// to a group or file reference, so no dangling child is ever added.
    pub fn add_file_to_group(&mut self, group: &Reference, file_ref: &Reference) {
        if self.store.file_element(file_ref).is_none() {
            warn!(group = %group, file = %file_ref, "file element not found; not linked");
            return;
        }
        let Some(record) = self.store.group_mut(group) else {
            warn!(group = %group, file = %file_ref, "group not found; not linked");
            return;
        };
        if record.children.contains(file_ref) {
            debug!(group = %group, file = %file_ref, "already a child");
            return;
        }
        record.children.push(file_ref.clone());
        debug!(group = %group, file = %file_ref, "linked file into group");
    }

    /// Attach a file to the target's sources build phase.
    ///
    /// Returns `Ok(None)` without touching the store when the target is
    /// unknown or has no sources phase. If any build file in the store
    /// already points at `file_ref`, that build file is returned unchanged,
    /// whichever phase holds it and even if `file_ref` no longer resolves.
    /// Otherwise a `file_ref` that does not resolve to a file element also
    /// yields `Ok(None)`.
    pub fn add_build_file(
        &mut self,
        target: &Reference,
        file_ref: &Reference,
    ) -> ProjectResult<Option<(Reference, PBXBuildFile)>> {
        let Some(phase) = self
            .store
            .target(target)
            .and_then(|record| self.store.sources_build_phase(record))
            .cloned()
        else {
            debug!(target = %target, "no sources build phase");
            return Ok(None);
        };
        if let Some((reference, build_file)) = self.store.build_file_for(file_ref) {
            debug!(build_file = %reference, file = %file_ref, "build file already exists");
            return Ok(Some((reference.clone(), build_file.clone())));
        }
        if self.store.file_element(file_ref).is_none() {
            warn!(target = %target, file = %file_ref, "file element not found; no build file");
            return Ok(None);
        }

        let build_file = PBXBuildFile::new(file_ref.clone());
        let reference = self.create(
            PBXObject::BuildFile(build_file.clone()),
            file_ref.as_str(),
        )?;
        if let Some(files) = self.store.phase_files_mut(&phase) {
            files.push(reference.clone());
        }
        debug!(build_file = %reference, phase = %phase, file = %file_ref, "added build file");
        Ok(Some((reference, build_file)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ProjectConfig;
    use crate::testing::FakeFileSystem;
    use pbx_store::{BuildPhaseKind, ObjectStore, PBXGroup, TargetKind};

    fn session(files: &[&str]) -> Project {
        Project::init("Demo", ProjectConfig::default())
            .unwrap()
            .with_file_system(FakeFileSystem::with_files(files))
    }

    // -----------------------------------------------------------------------
    // add_file
    // -----------------------------------------------------------------------

    #[test]
    fn add_file_creates_typed_reference() {
        let mut project = session(&["/p/A.swift"]);
        let (reference, file) = project.add_file("/p/A.swift").unwrap();
        assert_eq!(file.name.as_deref(), Some("A.swift"));
        assert_eq!(file.path, "/p/A.swift");
        assert_eq!(file.source_tree, SourceTree::Group);
        assert_eq!(
            file.last_known_file_type.as_ref().map(|t| t.as_str()),
            Some("sourcecode.swift")
        );
        assert_eq!(project.store().file_reference(&reference), Some(&file));
    }

    #[test]
    fn add_file_is_idempotent() {
        let mut project = session(&["/p/A.swift"]);
        let (first, _) = project.add_file("/p/A.swift").unwrap();
        let count = project.store().len();
        let (second, _) = project.add_file("/p/A.swift").unwrap();
        assert_eq!(first, second);
        assert_eq!(project.store().len(), count);
        assert_eq!(project.store().file_references().len(), 1);
    }

    #[test]
    fn add_file_returns_preexisting_record() {
        let mut store = ObjectStore::new();
        let existing = Reference::new("EXISTING").unwrap();
        let record = PBXFileReference {
            name: None,
            path: "/p/A.swift".into(),
            source_tree: SourceTree::Absolute,
            explicit_file_type: None,
            last_known_file_type: None,
        };
        store
            .insert(existing.clone(), PBXObject::FileReference(record.clone()))
            .unwrap();
        let mut project = Project::open(store, ProjectConfig::default())
            .with_file_system(FakeFileSystem::with_files(&["/p/A.swift"]));

        let (reference, file) = project.add_file("/p/A.swift").unwrap();
        assert_eq!(reference, existing);
        assert_eq!(file, record);
        assert_eq!(project.store().len(), 1);
    }

    #[test]
    fn add_file_rejects_missing_path_without_mutation() {
        let mut project = session(&[]);
        let before = project.store().clone();
        let err = project.add_file("/p/Missing.swift").unwrap_err();
        assert!(matches!(err, ProjectError::NotAFile(path) if path == Path::new("/p/Missing.swift")));
        assert_eq!(project.store(), &before);
    }

    #[test]
    fn add_file_on_real_filesystem() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Icon.png");
        std::fs::write(&path, [0u8; 4]).unwrap();
        let mut project = Project::init("Demo", ProjectConfig::default()).unwrap();

        let (_, file) = project.add_file(&path).unwrap();
        assert_eq!(
            file.last_known_file_type.as_ref().map(|t| t.as_str()),
            Some("image.png")
        );
        // A directory is not a file.
        assert!(matches!(
            project.add_file(dir.path()),
            Err(ProjectError::NotAFile(_))
        ));
    }

    #[cfg(unix)]
    #[test]
    fn add_file_rejects_non_utf8_paths() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let first = Path::new(OsStr::from_bytes(b"/p/\xff.swift"));
        let second = Path::new(OsStr::from_bytes(b"/p/\xfe.swift"));
        let mut project = Project::init("Demo", ProjectConfig::default())
            .unwrap()
            .with_file_system(FakeFileSystem::with_paths([first, second]));
        let before = project.store().clone();

        for path in [first, second] {
            let err = project.add_file(path).unwrap_err();
            assert!(matches!(err, ProjectError::NonUtf8Path(p) if p == path));
        }
        assert_eq!(project.store(), &before);
    }

    // -----------------------------------------------------------------------
    // add_file_to_group
    // -----------------------------------------------------------------------

    #[test]
    fn add_file_to_group_is_idempotent() {
        let mut project = session(&["/p/A.swift"]);
        let main = project.main_group().unwrap().clone();
        let (file, _) = project.add_file("/p/A.swift").unwrap();

        project.add_file_to_group(&main, &file);
        project.add_file_to_group(&main, &file);
        let children = &project.store().group(&main).unwrap().children;
        assert_eq!(children.iter().filter(|c| *c == &file).count(), 1);
    }

    #[test]
    fn add_file_to_group_skips_unresolved_inputs() {
        let mut project = session(&["/p/A.swift"]);
        let main = project.main_group().unwrap().clone();
        let (file, _) = project.add_file("/p/A.swift").unwrap();
        let before = project.store().clone();

        project.add_file_to_group(&main, &Reference::new("GHOST").unwrap());
        project.add_file_to_group(&Reference::new("NOGROUP").unwrap(), &file);
        // A file reference is not a group.
        project.add_file_to_group(&file, &main);
        assert_eq!(project.store(), &before);
    }

    #[test]
    fn add_file_to_group_does_not_duplicate_created_groups() {
        let mut project = session(&[]);
        let main = project.main_group().unwrap().clone();
        let chain = project.add_group_path("Inner", &main, false).unwrap();
        let inner = chain[0].0.clone();
        project.add_file_to_group(&main, &inner);
        let children = &project.store().group(&main).unwrap().children;
        assert_eq!(children.iter().filter(|c| *c == &inner).count(), 1);
    }

    // -----------------------------------------------------------------------
    // add_build_file
    // -----------------------------------------------------------------------

    #[test]
    fn add_build_file_links_into_sources_phase() {
        let mut project = session(&["/p/A.swift"]);
        let target = project.add_target("App", TargetKind::Native).unwrap();
        let (file, _) = project.add_file("/p/A.swift").unwrap();

        let (build_ref, build_file) = project.add_build_file(&target, &file).unwrap().unwrap();
        assert_eq!(build_file.file_ref.as_ref(), Some(&file));

        let store = project.store();
        let record = store.target(&target).unwrap();
        let phase = store.sources_build_phase(record).unwrap();
        assert_eq!(store.build_phase(phase).unwrap().files, vec![build_ref.clone()]);
        assert_eq!(
            store.phase_kind_of_build_file(&build_ref),
            Some(BuildPhaseKind::Sources)
        );
        assert_eq!(store.display_name_of_build_file(&build_ref), Some("Sources"));

        let sources: Vec<_> = store
            .source_files(record)
            .into_iter()
            .map(|(reference, _)| reference.clone())
            .collect();
        assert_eq!(sources, vec![file]);
    }

    #[test]
    fn add_build_file_is_idempotent() {
        let mut project = session(&["/p/A.swift"]);
        let target = project.add_target("App", TargetKind::Native).unwrap();
        let (file, _) = project.add_file("/p/A.swift").unwrap();

        let (first, _) = project.add_build_file(&target, &file).unwrap().unwrap();
        let count = project.store().len();
        let (second, _) = project.add_build_file(&target, &file).unwrap().unwrap();
        assert_eq!(first, second);
        assert_eq!(project.store().len(), count);
    }

    #[test]
    fn add_build_file_reuses_build_file_from_another_target() {
        let mut project = session(&["/p/A.swift"]);
        let app = project.add_target("App", TargetKind::Native).unwrap();
        let tests = project.add_target("AppTests", TargetKind::Native).unwrap();
        let (file, _) = project.add_file("/p/A.swift").unwrap();

        let (first, _) = project.add_build_file(&app, &file).unwrap().unwrap();
        let (second, _) = project.add_build_file(&tests, &file).unwrap().unwrap();
        assert_eq!(first, second);

        let store = project.store();
        let record = store.target(&tests).unwrap();
        assert!(store.source_files(record).is_empty());
    }

    #[test]
    fn add_build_file_returns_existing_record_for_unresolved_file() {
        let mut project = session(&[]);
        let target = project.add_target("App", TargetKind::Native).unwrap();
        let gone = Reference::new("GONE").unwrap();
        let existing = Reference::new("BF").unwrap();
        // As loaded from a snapshot whose file reference was dropped.
        let mut store = project.into_store();
        store
            .insert(existing.clone(), PBXObject::BuildFile(PBXBuildFile::new(gone.clone())))
            .unwrap();
        let mut project = Project::open(store, ProjectConfig::default());
        let before = project.store().clone();

        let (reference, build_file) = project.add_build_file(&target, &gone).unwrap().unwrap();
        assert_eq!(reference, existing);
        assert_eq!(build_file.file_ref, Some(gone));
        assert_eq!(project.store(), &before);
    }

    #[test]
    fn add_build_file_without_sources_phase_is_none() {
        let mut project = session(&["/p/A.swift"]);
        let target = project.add_target("All", TargetKind::Aggregate).unwrap();
        let (file, _) = project.add_file("/p/A.swift").unwrap();
        let before = project.store().clone();

        assert!(project.add_build_file(&target, &file).unwrap().is_none());
        assert_eq!(project.store(), &before);
    }

    #[test]
    fn add_build_file_with_unknown_inputs_is_none() {
        let mut project = session(&[]);
        let target = project.add_target("App", TargetKind::Native).unwrap();
        let ghost = Reference::new("GHOST").unwrap();
        let before = project.store().clone();

        assert!(project.add_build_file(&ghost, &target).unwrap().is_none());
        assert!(project.add_build_file(&target, &ghost).unwrap().is_none());
        assert_eq!(project.store(), &before);
    }

    #[test]
    fn partial_workflow_is_inspectable() {
        let mut project = session(&["/p/A.swift"]);
        let main = project.main_group().unwrap().clone();
        let (file, _) = project.add_file("/p/A.swift").unwrap();
        project.add_file_to_group(&main, &file);
        // Third step fails to find a target; earlier steps stay applied.
        let ghost = Reference::new("GHOST").unwrap();
        assert!(project.add_build_file(&ghost, &file).unwrap().is_none());
        assert!(project
            .store()
            .group(&main)
            .unwrap()
            .children
            .contains(&file));
    }

    #[test]
    fn add_file_to_group_accepts_groups_as_children() {
        let project = session(&[]);
        let main = project.main_group().unwrap().clone();
        let mut store = project.into_store();
        let extra = Reference::new("EXTRA").unwrap();
        store
            .insert(extra.clone(), PBXObject::Group(PBXGroup::default()))
            .unwrap();
        let mut project = Project::open(store, ProjectConfig::default());
        project.add_file_to_group(&main, &extra);
        assert!(project.store().group(&main).unwrap().children.contains(&extra));
    }
}
