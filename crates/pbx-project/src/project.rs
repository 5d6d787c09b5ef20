use pbx_store::{
    BuildPhaseKind, ExtensionClassifier, FileSystem, FileTypeClassifier, HashReferenceGenerator,
    ObjectStore, OsFileSystem, PBXBuildPhase, PBXGroup, PBXObject, PBXProject, PBXTarget,
    ReferenceGenerator, TargetKind, XCBuildConfiguration, XCConfigurationList,
};
use pbx_types::Reference;
use tracing::{debug, info};

use crate::config::ProjectConfig;
use crate::error::ProjectResult;

/// Configuration names created for new projects and targets.
pub const DEFAULT_CONFIGURATIONS: [&str; 2] = ["Debug", "Release"];

/// One editing session over a project graph.
///
/// Owns the [`ObjectStore`] together with the collaborators mutations need.
/// Every operation runs to completion; a multi-step edit is a sequence of
/// independent calls and nothing is rolled back if a later step fails.
pub struct Project {
    pub(crate) store: ObjectStore,
    pub(crate) fs: Box<dyn FileSystem>,
    pub(crate) classifier: Box<dyn FileTypeClassifier>,
    pub(crate) generator: Box<dyn ReferenceGenerator>,
    config: ProjectConfig,
}

impl Project {
    /// Open a session over an existing store with the default collaborators.
    ///
    /// The generator clamps `config.reference_bytes` into its supported
    /// range, so configs built in code need not be validated first.
    pub fn open(store: ObjectStore, config: ProjectConfig) -> Self {
        let generator =
            HashReferenceGenerator::new(config.reference_bytes, config.uppercase_references);
        Self {
            store,
            fs: Box::new(OsFileSystem),
            classifier: Box::new(ExtensionClassifier),
            generator: Box::new(generator),
            config,
        }
    }

    /// Start a new project graph: a project record, its main group with a
    /// `Products` child, and a Debug/Release configuration list.
    pub fn init(name: &str, config: ProjectConfig) -> ProjectResult<Self> {
        let mut project = Self::open(ObjectStore::new(), config);

        let list = project.create_configuration_list(name)?;
        let main_group = project.create(PBXObject::Group(PBXGroup::new(None, None)), name)?;
        let products = project.create(
            PBXObject::Group(PBXGroup::new(Some("Products".into()), None)),
            "Products",
        )?;
        if let Some(group) = project.store.group_mut(&main_group) {
            group.children.push(products.clone());
        }

        let mut record = PBXProject::new(main_group, list);
        record.products_group = Some(products);
        let reference = project.create(PBXObject::Project(record), name)?;
        info!(project = name, reference = %reference, "initialized project graph");
        Ok(project)
    }

    pub fn with_file_system(mut self, fs: impl FileSystem + 'static) -> Self {
        self.fs = Box::new(fs);
        self
    }

    pub fn with_classifier(mut self, classifier: impl FileTypeClassifier + 'static) -> Self {
        self.classifier = Box::new(classifier);
        self
    }

    pub fn with_generator(mut self, generator: impl ReferenceGenerator + 'static) -> Self {
        self.generator = Box::new(generator);
        self
    }

    // ---- Targets ----

    /// Add a target with its own Debug/Release configuration list.
    ///
    /// Native targets get empty Sources, Frameworks and Resources phases.
    /// The target is appended to the project's `targets` when a project
    /// record exists.
    pub fn add_target(&mut self, name: &str, kind: TargetKind) -> ProjectResult<Reference> {
        let list = self.create_configuration_list(name)?;
        let mut target = PBXTarget::new(kind, name, list);
        if kind == TargetKind::Native {
            for phase_kind in [
                BuildPhaseKind::Sources,
                BuildPhaseKind::Frameworks,
                BuildPhaseKind::Resources,
            ] {
                let phase = self.create(
                    PBXObject::BuildPhase(PBXBuildPhase::new(phase_kind)),
                    &format!("{name}.{}", phase_kind.label()),
                )?;
                target.build_phases.push(phase);
            }
        }
        let reference = self.create(PBXObject::Target(target), name)?;

        let owner = self.store.project().map(|(project, _)| project.clone());
        if let Some(project) = owner.and_then(|owner| self.store.project_mut(&owner)) {
            project.targets.push(reference.clone());
        }
        info!(target = name, kind = ?kind, reference = %reference, "added target");
        Ok(reference)
    }

    // ---- Accessors ----

    pub fn store(&self) -> &ObjectStore {
        &self.store
    }

    pub fn into_store(self) -> ObjectStore {
        self.store
    }

    pub fn config(&self) -> &ProjectConfig {
        &self.config
    }

    /// Main group of the first project record.
    pub fn main_group(&self) -> Option<&Reference> {
        self.store.project().map(|(_, project)| &project.main_group)
    }

    // ---- Internals ----

    /// Generate a reference for `object`, insert it, and return the reference.
    pub(crate) fn create(&mut self, object: PBXObject, context: &str) -> ProjectResult<Reference> {
        let reference = self.generator.generate(&object, context, &self.store)?;
        self.store.insert(reference.clone(), object)?;
        Ok(reference)
    }

    fn create_configuration_list(&mut self, owner: &str) -> ProjectResult<Reference> {
        let mut configurations = Vec::with_capacity(DEFAULT_CONFIGURATIONS.len());
        for name in DEFAULT_CONFIGURATIONS {
            let mut configuration = XCBuildConfiguration::new(name);
            configuration
                .build_settings
                .insert("PRODUCT_NAME".into(), owner.to_string());
            let reference = self.create(
                PBXObject::BuildConfiguration(configuration),
                &format!("{owner}.{name}"),
            )?;
            configurations.push(reference);
        }
        let list = XCConfigurationList {
            build_configurations: configurations,
            default_configuration_is_visible: false,
            default_configuration_name: Some("Release".into()),
        };
        let reference = self.create(PBXObject::ConfigurationList(list), owner)?;
        debug!(owner, reference = %reference, "created configuration list");
        Ok(reference)
    }
}

impl std::fmt::Debug for Project {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Project")
            .field("store", &self.store)
            .field("config", &self.config)
            .finish()
    }
}
