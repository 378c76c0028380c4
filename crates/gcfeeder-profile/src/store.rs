//! Profile store core implementation

use std::sync::Arc;

use gcfeeder_calibration::{CalibrationSink, StickCalibration, SticksCalibration, TriggerCalibration, TriggersCalibration};
use gcfeeder_editor::{EditOp, EditReport, EditorUi, SchemaEditor};
use gcfeeder_errors::{GcfeederError, ProfileError, SchemaError};
use gcfeeder_inputs::ReloadFlag;
use gcfeeder_schema::{DocumentMap, DocumentPath, DocumentValue, ProfileSchema};
use tracing::{debug, info, warn};

use crate::config::ProfileStoreConfig;
use crate::storage::{DocumentStorage, FileStorage};

const SCHEMA_KEY: &str = "$schema";
const CURRENT_PROFILE_KEY: &str = "current_profile";
const PROFILES_KEY: &str = "profiles";
const NAME_KEY: &str = "name";
const CONFIG_KEY: &str = "config";
const CALIBRATION_KEY: &str = "calibration";

/// A named configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct Profile {
    name: String,
    config: DocumentValue,
    dirty: bool,
    /// The entry as loaded, including keys this crate does not know about.
    entry: DocumentMap,
}

impl Profile {
    /// A new, unsaved profile.
    pub fn new(name: impl Into<String>, config: DocumentValue) -> Self {
        Self {
            name: name.into(),
            config,
            dirty: true,
            entry: DocumentMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn config(&self) -> &DocumentValue {
        &self.config
    }

    /// Changed since the last save or load.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    fn to_document(&self) -> DocumentValue {
        let mut entry = self.entry.clone();
        entry.insert(NAME_KEY.to_string(), DocumentValue::from(self.name.as_str()));
        entry.insert(CONFIG_KEY.to_string(), self.config.clone());
        DocumentValue::Object(entry)
    }
}

/// Working copy of the current profile's config.
#[derive(Debug, Clone, PartialEq)]
pub struct EditBuffer {
    profile_name: String,
    config: DocumentValue,
    dirty: bool,
}

impl EditBuffer {
    pub fn profile_name(&self) -> &str {
        &self.profile_name
    }

    pub fn config(&self) -> &DocumentValue {
        &self.config
    }

    /// Holds edits not yet committed to the profile.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }
}

/// Everything read from one store document.
#[derive(Debug, Clone, PartialEq)]
struct StoreState {
    schema_url: Option<String>,
    current: String,
    profiles: Vec<Profile>,
    /// Top-level document as loaded.
    extra: DocumentMap,
}

impl StoreState {
    fn from_document(document: DocumentValue, location: &str) -> Result<Self, ProfileError> {
        let invalid = |reason: String| ProfileError::invalid_format(location, reason);

        let kind = document.kind();
        let DocumentValue::Object(extra) = document else {
            return Err(invalid(format!("expected an object, found {kind}")));
        };

        let schema_url = extra.get(SCHEMA_KEY).and_then(DocumentValue::as_str).map(str::to_string);

        let entries = extra
            .get(PROFILES_KEY)
            .and_then(DocumentValue::as_array)
            .ok_or_else(|| invalid(format!("'{PROFILES_KEY}' must be an array")))?;
        if entries.is_empty() {
            return Err(invalid(format!("'{PROFILES_KEY}' must not be empty")));
        }

        let mut profiles: Vec<Profile> = Vec::with_capacity(entries.len());
        for (index, entry) in entries.iter().enumerate() {
            let fields = entry
                .as_object()
                .ok_or_else(|| invalid(format!("profiles[{index}] must be an object")))?;
            let name = fields
                .get(NAME_KEY)
                .and_then(DocumentValue::as_str)
                .ok_or_else(|| invalid(format!("profiles[{index}].name must be a string")))?;
            let config = fields
                .get(CONFIG_KEY)
                .filter(|c| c.as_object().is_some())
                .ok_or_else(|| invalid(format!("profiles[{index}].config must be an object")))?;
            if profiles.iter().any(|p| p.name == name) {
                return Err(invalid(format!("duplicate profile name '{name}'")));
            }
            profiles.push(Profile {
                name: name.to_string(),
                config: config.clone(),
                dirty: false,
                entry: fields.clone(),
            });
        }

        let requested = extra.get(CURRENT_PROFILE_KEY).and_then(DocumentValue::as_str);
        let current = match requested {
            Some(name) if profiles.iter().any(|p| p.name == name) => name.to_string(),
            _ => {
                let fallback = profiles.first().map(|p| p.name.clone()).unwrap_or_default();
                warn!(
                    requested = requested.unwrap_or("<missing>"),
                    profile = %fallback,
                    "current profile does not exist, selecting first profile"
                );
                fallback
            }
        };

        Ok(Self {
            schema_url,
            current,
            profiles,
            extra,
        })
    }

    fn to_document(&self) -> DocumentValue {
        let mut document = self.extra.clone();
        if let Some(url) = &self.schema_url {
            document.insert(SCHEMA_KEY.to_string(), DocumentValue::from(url.as_str()));
        }
        document.insert(CURRENT_PROFILE_KEY.to_string(), DocumentValue::from(self.current.as_str()));
        document.insert(
            PROFILES_KEY.to_string(),
            DocumentValue::Array(self.profiles.iter().map(Profile::to_document).collect()),
        );
        DocumentValue::Object(document)
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.profiles.iter().position(|p| p.name == name)
    }
}

/// Named profiles, the current selection and an optional edit buffer,
/// persisted through a [`DocumentStorage`].
///
/// The current profile always exists. Editing goes through an
/// [`EditBuffer`] copied from the current profile on first use; nothing
/// reaches the profile until [`commit_edits`](Self::commit_edits), and
/// nothing reaches storage until [`save`](Self::save).
#[derive(Debug)]
pub struct ProfileStore<S = FileStorage> {
    config: ProfileStoreConfig,
    schema: ProfileSchema,
    storage: S,
    state: StoreState,
    buffer: Option<EditBuffer>,
    reload: Arc<ReloadFlag>,
}

impl ProfileStore<FileStorage> {
    /// Open the JSON file named by `config.path`.
    ///
    /// # Errors
    ///
    /// See [`open`](Self::open).
    pub fn open_file(config: ProfileStoreConfig, schema: ProfileSchema) -> Result<Self, ProfileError> {
        let storage = FileStorage::new(config.path.clone()).with_atomic_writes(config.atomic_writes);
        Self::open(config, schema, storage)
    }
}

impl<S: DocumentStorage> ProfileStore<S> {
    /// Load the store document from `storage`.
    ///
    /// # Errors
    ///
    /// [`ProfileError::Io`] if the document cannot be read,
    /// [`ProfileError::InvalidFormat`] if it is not a store document.
    pub fn open(config: ProfileStoreConfig, schema: ProfileSchema, storage: S) -> Result<Self, ProfileError> {
        let state = StoreState::from_document(storage.load_document()?, &storage.location())?;
        let reload = config.reload.clone().unwrap_or_default();
        info!(
            location = %storage.location(),
            profiles = state.profiles.len(),
            profile = %state.current,
            "Profile store opened"
        );
        Ok(Self {
            config,
            schema,
            storage,
            state,
            buffer: None,
            reload,
        })
    }

    pub fn schema(&self) -> &ProfileSchema {
        &self.schema
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Flag raised after every successful save or load.
    pub fn reload_flag(&self) -> &Arc<ReloadFlag> {
        &self.reload
    }

    pub fn profiles(&self) -> &[Profile] {
        &self.state.profiles
    }

    pub fn profile_names(&self) -> impl Iterator<Item = &str> {
        self.state.profiles.iter().map(Profile::name)
    }

    pub fn profile(&self, name: &str) -> Option<&Profile> {
        self.state.profiles.iter().find(|p| p.name == name)
    }

    pub fn current_profile_name(&self) -> &str {
        &self.state.current
    }

    pub fn current_profile(&self) -> Option<&Profile> {
        self.profile(&self.state.current)
    }

    pub fn schema_url(&self) -> Option<&str> {
        self.state.schema_url.as_deref()
    }

    pub fn edit_buffer(&self) -> Option<&EditBuffer> {
        self.buffer.as_ref()
    }

    /// The current profile's config, as edited if a buffer is open.
    pub fn current_config(&self) -> Option<&DocumentValue> {
        match &self.buffer {
            Some(buffer) => Some(&buffer.config),
            None => self.current_profile().map(Profile::config),
        }
    }

    /// Unsaved changes anywhere: an uncommitted edit buffer or a profile
    /// changed since the last save or load.
    pub fn is_dirty(&self) -> bool {
        self.buffer.as_ref().is_some_and(|b| b.dirty) || self.state.profiles.iter().any(|p| p.dirty)
    }

    /// Switch the current profile, dropping any open edit buffer.
    ///
    /// # Errors
    ///
    /// [`ProfileError::NotFound`] if no profile is called `name`.
    pub fn select_profile(&mut self, name: &str) -> Result<(), ProfileError> {
        if self.state.position(name).is_none() {
            return Err(ProfileError::not_found(name));
        }
        self.discard_edits();
        self.state.current = name.to_string();
        info!(profile = %name, "Profile selected");
        Ok(())
    }

    /// Append a profile and select it.
    ///
    /// # Errors
    ///
    /// [`ProfileError::DuplicateName`] if `name` is taken.
    pub fn add_profile(&mut self, name: &str, config: DocumentValue) -> Result<(), ProfileError> {
        if self.state.position(name).is_some() {
            return Err(ProfileError::duplicate_name(name));
        }
        self.state.profiles.push(Profile::new(name, config));
        info!(profile = %name, "Profile added");
        self.select_profile(name)
    }

    /// Add a copy of the current config (edited, if a buffer is open) under
    /// `name` and select it.
    ///
    /// # Errors
    ///
    /// [`ProfileError::DuplicateName`] if `name` is taken.
    pub fn duplicate_current(&mut self, name: &str) -> Result<(), ProfileError> {
        let config = self
            .current_config()
            .cloned()
            .ok_or_else(|| ProfileError::not_found(self.state.current.as_str()))?;
        self.add_profile(name, config)
    }

    /// Remove a profile. Removing the current profile selects the first
    /// remaining one and drops the edit buffer.
    ///
    /// # Errors
    ///
    /// [`ProfileError::NotFound`] if no profile is called `name`,
    /// [`ProfileError::LastProfile`] if it is the only profile.
    pub fn remove_profile(&mut self, name: &str) -> Result<(), ProfileError> {
        let index = self.state.position(name).ok_or_else(|| ProfileError::not_found(name))?;
        if self.state.profiles.len() <= 1 {
            return Err(ProfileError::last_profile(name));
        }
        self.state.profiles.remove(index);
        info!(profile = %name, "Profile removed");

        if self.state.current == name {
            self.buffer = None;
            if let Some(first) = self.state.profiles.first() {
                self.state.current = first.name.clone();
            }
            info!(profile = %self.state.current, "Current profile removed, selected first profile");
        }
        Ok(())
    }

    /// Persist every profile and the current selection.
    ///
    /// Uncommitted edits are not written.
    ///
    /// # Errors
    ///
    /// Any storage error. In-memory state, including dirty flags, is left as
    /// it was.
    pub fn save(&mut self) -> Result<(), ProfileError> {
        let document = self.state.to_document();
        self.storage.save_document(&document).inspect_err(|e| {
            warn!(location = %self.storage.location(), error = %e, "Failed to save profile store");
        })?;

        for profile in &mut self.state.profiles {
            profile.dirty = false;
        }
        self.reload.request();
        info!(
            location = %self.storage.location(),
            profiles = self.state.profiles.len(),
            "Profile store saved"
        );
        Ok(())
    }

    /// Replace everything in memory with the stored document, discarding
    /// unsaved and uncommitted edits.
    ///
    /// # Errors
    ///
    /// Any storage or format error. In-memory state is left as it was.
    pub fn load(&mut self) -> Result<(), ProfileError> {
        let location = self.storage.location();
        let state = self
            .storage
            .load_document()
            .and_then(|document| StoreState::from_document(document, &location))
            .inspect_err(|e| warn!(location = %location, error = %e, "Failed to load profile store"))?;

        self.state = state;
        self.buffer = None;
        self.reload.request();
        info!(
            location = %location,
            profiles = self.state.profiles.len(),
            profile = %self.state.current,
            "Profile store loaded"
        );
        Ok(())
    }

    /// Set `$schema` from the configured base URL and relative path.
    ///
    /// Returns the new URL, or `None` if no schema URL is configured.
    pub fn update_schema_url(&mut self) -> Option<&str> {
        let url = self.config.schema_url()?;
        debug!(url = %url, "Schema URL updated");
        self.state.schema_url = Some(url);
        self.state.schema_url.as_deref()
    }

    /// Draw the current profile's form, editing the buffer.
    pub fn edit_with<U: EditorUi + ?Sized>(&mut self, editor: &SchemaEditor, ui: &mut U) -> EditReport {
        let schema = self.schema.shared();
        let Some(buffer) = self.open_buffer() else {
            return EditReport::default();
        };
        let report = editor.edit(ui, &schema, &mut buffer.config);
        if report.changed {
            buffer.dirty = true;
        }
        report
    }

    /// Apply one edit to the buffer.
    ///
    /// # Errors
    ///
    /// Whatever [`SchemaEditor::apply`] rejects.
    pub fn apply(&mut self, editor: &SchemaEditor, path: &DocumentPath, op: EditOp) -> Result<bool, GcfeederError> {
        let schema = self.schema.shared();
        let current = self.state.current.clone();
        let buffer = self.open_buffer().ok_or_else(|| ProfileError::not_found(current))?;
        let changed = editor.apply(&schema, &mut buffer.config, path, op)?;
        if changed {
            buffer.dirty = true;
        }
        Ok(changed)
    }

    /// Copy the buffer into its profile and close it. Returns whether
    /// anything was committed.
    pub fn commit_edits(&mut self) -> bool {
        let Some(buffer) = self.buffer.take() else {
            return false;
        };
        if !buffer.dirty {
            return false;
        }
        let Some(profile) = self.state.profiles.iter_mut().find(|p| p.name == buffer.profile_name) else {
            return false;
        };
        profile.config = buffer.config;
        profile.dirty = true;
        info!(profile = %profile.name, "Profile edits committed");
        true
    }

    /// Drop the buffer and any uncommitted edits in it.
    pub fn discard_edits(&mut self) {
        if let Some(buffer) = self.buffer.take().filter(|b| b.dirty) {
            debug!(profile = %buffer.profile_name, "Uncommitted edits discarded");
        }
    }

    fn open_buffer(&mut self) -> Option<&mut EditBuffer> {
        if self.buffer.is_none() {
            let profile = self.state.profiles.iter().find(|p| p.name == self.state.current)?;
            debug!(profile = %profile.name, "Edit buffer opened");
            self.buffer = Some(EditBuffer {
                profile_name: profile.name.clone(),
                config: profile.config.clone(),
                dirty: false,
            });
        }
        self.buffer.as_mut()
    }

    /// Store `value` at `calibration.<key>` in the buffer.
    fn write_calibration(&mut self, key: &str, value: DocumentValue) -> Result<(), GcfeederError> {
        let current = self.state.current.clone();
        let buffer = self.open_buffer().ok_or_else(|| ProfileError::not_found(current))?;
        let calibration = buffer
            .config
            .get_mut(CALIBRATION_KEY)
            .and_then(DocumentValue::as_object_mut)
            .ok_or_else(|| SchemaError::mismatch(CALIBRATION_KEY, "profile has no calibration object"))?;
        calibration.insert(key.to_string(), value);
        buffer.dirty = true;
        info!(profile = %buffer.profile_name, field = %key, "Calibration written to edit buffer");
        Ok(())
    }
}

impl<S: DocumentStorage> CalibrationSink for ProfileStore<S> {
    fn apply_stick_calibration(
        &mut self,
        main_stick: StickCalibration,
        c_stick: StickCalibration,
    ) -> Result<(), GcfeederError> {
        let sticks = SticksCalibration { main_stick, c_stick };
        self.write_calibration("stick_data", sticks.to_document())
    }

    fn apply_trigger_calibration(
        &mut self,
        l_trigger: TriggerCalibration,
        r_trigger: TriggerCalibration,
    ) -> Result<(), GcfeederError> {
        let triggers = TriggersCalibration { l_trigger, r_trigger };
        triggers.validate()?;
        self.write_calibration("trigger_data", triggers.to_document())
    }
}
