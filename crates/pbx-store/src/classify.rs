//! Build phase classification.
//!
//! Maps a build phase or build file reference to its [`BuildPhaseKind`] and
//! a display name. Kinds are tested in [`BuildPhaseKind::ALL`] order and
//! the first match wins.

use pbx_types::Reference;

use crate::object::BuildPhaseKind;
use crate::store::ObjectStore;

impl ObjectStore {
    /// Kind of the phase that lists `build_file` in its `files`.
    ///
    /// Run-script phases are not considered.
    pub fn phase_kind_of_build_file(&self, build_file: &Reference) -> Option<BuildPhaseKind> {
        BuildPhaseKind::FILE_BEARING.into_iter().find(|kind| {
            self.phases_of(*kind)
                .values()
                .any(|phase| phase.files.contains(build_file))
        })
    }

    /// Kind of the partition holding `phase`.
    pub fn phase_kind_of_phase(&self, phase: &Reference) -> Option<BuildPhaseKind> {
        BuildPhaseKind::ALL
            .into_iter()
            .find(|kind| self.phases_of(*kind).contains_key(phase))
    }

    /// Display name of a build phase.
    ///
    /// Copy-files and run-script phases use their own name when set.
    pub fn display_name_of_phase(&self, phase: &Reference) -> Option<&str> {
        let kind = self.phase_kind_of_phase(phase)?;
        match kind {
            BuildPhaseKind::CopyFiles | BuildPhaseKind::RunScript => Some(
                self.phases_of(kind)
                    .get(phase)
                    .and_then(|record| record.name())
                    .unwrap_or(kind.label()),
            ),
            _ => Some(kind.label()),
        }
    }

    /// Display name of the phase a build file belongs to.
    pub fn display_name_of_build_file(&self, build_file: &Reference) -> Option<&str> {
        let kind = self.phase_kind_of_build_file(build_file)?;
        if kind != BuildPhaseKind::CopyFiles {
            return Some(kind.label());
        }
        let own_name = self
            .phases_of(kind)
            .values()
            .find(|phase| phase.files.contains(build_file))
            .and_then(|phase| phase.name());
        Some(own_name.unwrap_or(kind.label()))
    }
}
