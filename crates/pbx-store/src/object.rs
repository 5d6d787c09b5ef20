use std::collections::BTreeMap;
use std::fmt;

use pbx_types::{FileType, Reference, SourceTree};
use serde::{Deserialize, Serialize};

/// The partition a record lives in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ObjectKind {
    NativeTarget,
    LegacyTarget,
    AggregateTarget,
    Group,
    FileReference,
    BuildFile,
    BuildConfiguration,
    ConfigurationList,
    Project,
    BuildPhase(BuildPhaseKind),
}

impl ObjectKind {
    /// The `isa` name used in project files.
    pub fn isa(&self) -> &'static str {
        match self {
            Self::NativeTarget => "PBXNativeTarget",
            Self::LegacyTarget => "PBXLegacyTarget",
            Self::AggregateTarget => "PBXAggregateTarget",
            Self::Group => "PBXGroup",
            Self::FileReference => "PBXFileReference",
            Self::BuildFile => "PBXBuildFile",
            Self::BuildConfiguration => "XCBuildConfiguration",
            Self::ConfigurationList => "XCConfigurationList",
            Self::Project => "PBXProject",
            Self::BuildPhase(kind) => kind.isa(),
        }
    }
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.isa())
    }
}

// ---------------------------------------------------------------------------
// Build phase taxonomy
// ---------------------------------------------------------------------------

/// The fixed taxonomy of build phases.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum BuildPhaseKind {
    Sources,
    Frameworks,
    Resources,
    CopyFiles,
    Headers,
    CarbonResources,
    RunScript,
}

impl BuildPhaseKind {
    /// All kinds in classification priority order.
    pub const ALL: [Self; 7] = [
        Self::Sources,
        Self::Frameworks,
        Self::Resources,
        Self::CopyFiles,
        Self::Headers,
        Self::CarbonResources,
        Self::RunScript,
    ];

    /// Kinds whose phases carry build files, in priority order.
    /// Run-script phases never hold build files.
    pub const FILE_BEARING: [Self; 6] = [
        Self::Sources,
        Self::Frameworks,
        Self::Resources,
        Self::CopyFiles,
        Self::Headers,
        Self::CarbonResources,
    ];

    /// Position in [`Self::ALL`]; used as the partition slot.
    pub fn index(&self) -> usize {
        match self {
            Self::Sources => 0,
            Self::Frameworks => 1,
            Self::Resources => 2,
            Self::CopyFiles => 3,
            Self::Headers => 4,
            Self::CarbonResources => 5,
            Self::RunScript => 6,
        }
    }

    pub fn isa(&self) -> &'static str {
        match self {
            Self::Sources => "PBXSourcesBuildPhase",
            Self::Frameworks => "PBXFrameworksBuildPhase",
            Self::Resources => "PBXResourcesBuildPhase",
            Self::CopyFiles => "PBXCopyFilesBuildPhase",
            Self::Headers => "PBXHeadersBuildPhase",
            Self::CarbonResources => "PBXRezBuildPhase",
            Self::RunScript => "PBXShellScriptBuildPhase",
        }
    }

    /// Fixed display label for phases of this kind.
    ///
    /// Copy-files and run-script phases prefer their own `name` when set;
    /// this is the fallback for them.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Sources => "Sources",
            Self::Frameworks => "Frameworks",
            Self::Resources => "Resources",
            Self::CopyFiles => "CopyFiles",
            Self::Headers => "Headers",
            Self::CarbonResources => "Rez",
            Self::RunScript => "ShellScript",
        }
    }
}

impl fmt::Display for BuildPhaseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Kind-specific payload of a build phase.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum PhaseDetail {
    Sources,
    Frameworks,
    Resources,
    CopyFiles {
        name: Option<String>,
        dst_path: String,
        /// Destination code (`dstSubfolderSpec`), e.g. 10 = Frameworks.
        dst_subfolder_spec: u32,
    },
    Headers,
    CarbonResources,
    RunScript {
        name: Option<String>,
        shell_path: String,
        shell_script: String,
        input_paths: Vec<String>,
        output_paths: Vec<String>,
    },
}

/// A build phase: an ordered bucket of build files.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PBXBuildPhase {
    /// References to [`PBXBuildFile`] records.
    pub files: Vec<Reference>,
    pub run_only_for_deployment_postprocessing: bool,
    pub detail: PhaseDetail,
}

impl PBXBuildPhase {
    /// An empty phase of the given kind with default details.
    pub fn new(kind: BuildPhaseKind) -> Self {
        let detail = match kind {
            BuildPhaseKind::Sources => PhaseDetail::Sources,
            BuildPhaseKind::Frameworks => PhaseDetail::Frameworks,
            BuildPhaseKind::Resources => PhaseDetail::Resources,
            BuildPhaseKind::CopyFiles => PhaseDetail::CopyFiles {
                name: None,
                dst_path: String::new(),
                dst_subfolder_spec: 0,
            },
            BuildPhaseKind::Headers => PhaseDetail::Headers,
            BuildPhaseKind::CarbonResources => PhaseDetail::CarbonResources,
            BuildPhaseKind::RunScript => PhaseDetail::RunScript {
                name: None,
                shell_path: "/bin/sh".into(),
                shell_script: String::new(),
                input_paths: Vec::new(),
                output_paths: Vec::new(),
            },
        };
        Self {
            files: Vec::new(),
            run_only_for_deployment_postprocessing: false,
            detail,
        }
    }

    pub fn kind(&self) -> BuildPhaseKind {
        match self.detail {
            PhaseDetail::Sources => BuildPhaseKind::Sources,
            PhaseDetail::Frameworks => BuildPhaseKind::Frameworks,
            PhaseDetail::Resources => BuildPhaseKind::Resources,
            PhaseDetail::CopyFiles { .. } => BuildPhaseKind::CopyFiles,
            PhaseDetail::Headers => BuildPhaseKind::Headers,
            PhaseDetail::CarbonResources => BuildPhaseKind::CarbonResources,
            PhaseDetail::RunScript { .. } => BuildPhaseKind::RunScript,
        }
    }

    /// The phase's own name. Only copy-files and run-script phases have one.
    pub fn name(&self) -> Option<&str> {
        match &self.detail {
            PhaseDetail::CopyFiles { name, .. } | PhaseDetail::RunScript { name, .. } => {
                name.as_deref()
            }
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Targets
// ---------------------------------------------------------------------------

/// Variant-specific target fields.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "variant", rename_all = "camelCase")]
pub enum TargetVariant {
    Native {
        product_type: Option<String>,
        product_reference: Option<Reference>,
    },
    Legacy {
        build_tool_path: String,
        build_arguments_string: Option<String>,
        build_working_directory: Option<String>,
        pass_build_settings_in_environment: bool,
    },
    Aggregate,
}

/// The three target variants, without payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TargetKind {
    Native,
    Legacy,
    Aggregate,
}

impl TargetKind {
    pub fn object_kind(&self) -> ObjectKind {
        match self {
            Self::Native => ObjectKind::NativeTarget,
            Self::Legacy => ObjectKind::LegacyTarget,
            Self::Aggregate => ObjectKind::AggregateTarget,
        }
    }
}

/// A buildable unit. Shared fields live here; the variant carries the rest.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PBXTarget {
    pub name: String,
    pub product_name: Option<String>,
    /// Ordered references to build phase records.
    pub build_phases: Vec<Reference>,
    pub build_configuration_list: Reference,
    pub dependencies: Vec<Reference>,
    pub variant: TargetVariant,
}

impl PBXTarget {
    /// A target with no phases or dependencies and default variant fields.
    pub fn new(kind: TargetKind, name: impl Into<String>, configuration_list: Reference) -> Self {
        let name = name.into();
        let variant = match kind {
            TargetKind::Native => TargetVariant::Native {
                product_type: None,
                product_reference: None,
            },
            TargetKind::Legacy => TargetVariant::Legacy {
                build_tool_path: "/usr/bin/make".into(),
                build_arguments_string: Some("$(ACTION)".into()),
                build_working_directory: None,
                pass_build_settings_in_environment: true,
            },
            TargetKind::Aggregate => TargetVariant::Aggregate,
        };
        Self {
            product_name: Some(name.clone()),
            name,
            build_phases: Vec::new(),
            build_configuration_list: configuration_list,
            dependencies: Vec::new(),
            variant,
        }
    }

    pub fn kind(&self) -> TargetKind {
        match self.variant {
            TargetVariant::Native { .. } => TargetKind::Native,
            TargetVariant::Legacy { .. } => TargetKind::Legacy,
            TargetVariant::Aggregate => TargetKind::Aggregate,
        }
    }
}

// ---------------------------------------------------------------------------
// File elements
// ---------------------------------------------------------------------------

/// A folder-like node in the logical file tree.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PBXGroup {
    /// Group or file reference children, in display order.
    pub children: Vec<Reference>,
    pub name: Option<String>,
    pub path: Option<String>,
    pub source_tree: SourceTree,
}

impl PBXGroup {
    /// An empty `<group>`-relative group.
    pub fn new(name: Option<String>, path: Option<String>) -> Self {
        Self {
            children: Vec::new(),
            name,
            path,
            source_tree: SourceTree::Group,
        }
    }
}

/// A reference to one file on disk.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PBXFileReference {
    pub name: Option<String>,
    pub path: String,
    pub source_tree: SourceTree,
    pub explicit_file_type: Option<FileType>,
    pub last_known_file_type: Option<FileType>,
}

/// A resolved group or file reference, borrowed from the store.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FileElement<'a> {
    Group(&'a PBXGroup),
    FileReference(&'a PBXFileReference),
}

impl<'a> FileElement<'a> {
    pub fn name(&self) -> Option<&'a str> {
        match self {
            Self::Group(group) => group.name.as_deref(),
            Self::FileReference(file) => file.name.as_deref(),
        }
    }

    pub fn path(&self) -> Option<&'a str> {
        match self {
            Self::Group(group) => group.path.as_deref(),
            Self::FileReference(file) => Some(file.path.as_str()),
        }
    }

    pub fn source_tree(&self) -> &'a SourceTree {
        match self {
            Self::Group(group) => &group.source_tree,
            Self::FileReference(file) => &file.source_tree,
        }
    }

    /// Name if set, else path.
    pub fn display_name(&self) -> Option<&'a str> {
        self.name().or_else(|| self.path())
    }

    pub fn as_file_reference(&self) -> Option<&'a PBXFileReference> {
        match self {
            Self::FileReference(file) => Some(file),
            Self::Group(_) => None,
        }
    }
}

/// Join record: "this file participates in this build phase".
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PBXBuildFile {
    pub file_ref: Option<Reference>,
    pub settings: BTreeMap<String, String>,
}

impl PBXBuildFile {
    pub fn new(file_ref: Reference) -> Self {
        Self {
            file_ref: Some(file_ref),
            settings: BTreeMap::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// Configurations and project
// ---------------------------------------------------------------------------

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct XCBuildConfiguration {
    pub name: String,
    pub build_settings: BTreeMap<String, String>,
    pub base_configuration_reference: Option<Reference>,
}

impl XCBuildConfiguration {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            build_settings: BTreeMap::new(),
            base_configuration_reference: None,
        }
    }
}

/// Owned by exactly one project or target; the owner is found by reverse scan.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct XCConfigurationList {
    pub build_configurations: Vec<Reference>,
    pub default_configuration_is_visible: bool,
    pub default_configuration_name: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PBXProject {
    pub main_group: Reference,
    pub products_group: Option<Reference>,
    pub targets: Vec<Reference>,
    pub build_configuration_list: Reference,
    pub compatibility_version: String,
    pub project_dir_path: String,
}

impl PBXProject {
    pub fn new(main_group: Reference, build_configuration_list: Reference) -> Self {
        Self {
            main_group,
            products_group: None,
            targets: Vec::new(),
            build_configuration_list,
            compatibility_version: "Xcode 14.0".into(),
            project_dir_path: String::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// PBXObject
// ---------------------------------------------------------------------------

/// Any record, owned. The unit of insertion and of reference generation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PBXObject {
    Target(PBXTarget),
    Group(PBXGroup),
    FileReference(PBXFileReference),
    BuildFile(PBXBuildFile),
    BuildPhase(PBXBuildPhase),
    BuildConfiguration(XCBuildConfiguration),
    ConfigurationList(XCConfigurationList),
    Project(PBXProject),
}

impl PBXObject {
    /// The partition this record belongs in.
    pub fn kind(&self) -> ObjectKind {
        match self {
            Self::Target(target) => target.kind().object_kind(),
            Self::Group(_) => ObjectKind::Group,
            Self::FileReference(_) => ObjectKind::FileReference,
            Self::BuildFile(_) => ObjectKind::BuildFile,
            Self::BuildPhase(phase) => ObjectKind::BuildPhase(phase.kind()),
            Self::BuildConfiguration(_) => ObjectKind::BuildConfiguration,
            Self::ConfigurationList(_) => ObjectKind::ConfigurationList,
            Self::Project(_) => ObjectKind::Project,
        }
    }

    pub fn isa(&self) -> &'static str {
        self.kind().isa()
    }
}
