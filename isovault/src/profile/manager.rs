//! Profile operations for the command-line surface.

use serde_yaml_ng::{Mapping, Value};
use tracing::debug;

use crate::error::VaultResult;
use crate::manager::{Interaction, Output};

use super::store::{ProfileStore, DEFAULT_PROFILE};

/// Fields collected by the interactive add flow, in prompt order.
pub const PROFILE_FIELDS: [&str; 9] = [
    "hostname",
    "username",
    "password",
    "timezone",
    "domain",
    "locale",
    "keyboard",
    "packages",
    "authorized_keys_url",
];

/// Orchestrates profile listing, display, and interactive creation.
pub struct ProfileManager<'a> {
    store: ProfileStore,
    output: &'a dyn Output,
    interaction: &'a dyn Interaction,
}

impl<'a> ProfileManager<'a> {
    /// Create a manager over a loaded profile store.
    pub fn new(
        store: ProfileStore,
        output: &'a dyn Output,
        interaction: &'a dyn Interaction,
    ) -> Self {
        Self {
            store,
            output,
            interaction,
        }
    }

    /// List profile names in sorted order.
    ///
    /// The long format adds hostname and username columns from the
    /// resolved profile, so inherited values show up too.
    pub fn list(&self, long: bool) {
        if self.store.is_empty() {
            self.output
                .line("No profiles configured. Use \"isovault profile add\" to add some.");
            return;
        }

        if !long {
            for name in self.store.names() {
                self.output.line(name);
            }
            return;
        }

        let name_width = self
            .store
            .names()
            .iter()
            .map(|name| name.len())
            .max()
            .unwrap_or(0);

        for name in self.store.names() {
            let resolved = self.store.resolve(name);
            self.output.line(&format!(
                "{:<name_width$}  {}  {}",
                name,
                field_text(&resolved, "hostname"),
                field_text(&resolved, "username"),
            ));
        }
    }

    /// Show the resolved configuration of one profile.
    ///
    /// Unknown names resolve against the default profile first; only a name
    /// that resolves to nothing (and is not `default` itself) is an error.
    pub fn show(&self, name: &str) -> bool {
        let resolved = self.store.resolve(name);

        if resolved.is_empty() && name != DEFAULT_PROFILE {
            self.output
                .line(&format!("Error: Profile '{}' not found", name));
            return false;
        }

        self.output.line(&format!("Profile: {}", name));
        self.output.line("");
        self.output.line("Configuration:");

        if resolved.is_empty() {
            self.output.line("  (no configuration)");
        } else {
            for (field, value) in &resolved {
                self.output
                    .line(&format!("  {}: {}", value_text(field), value_text(value)));
            }
        }

        true
    }

    /// Interactively create a profile from the fixed field list.
    ///
    /// Empty answers skip a field entirely; a profile with no answered
    /// fields is not created. An existing name asks before overwriting.
    pub fn add(&self) -> VaultResult<bool> {
        self.output.line("Add New Profile");
        self.output.line("");

        let name = self.interaction.prompt("Profile name");
        if name.is_empty() {
            self.output.line("Error: Profile name is required");
            return Ok(false);
        }

        if self.store.contains(&name)
            && !self
                .interaction
                .confirm(&format!("Profile '{}' already exists. Overwrite?", name))
        {
            return Ok(false);
        }

        let mut data = Mapping::new();
        for field in PROFILE_FIELDS {
            let value = self.interaction.prompt(field);
            if !value.is_empty() {
                data.insert(Value::String(field.to_string()), Value::String(value));
            }
        }

        if data.is_empty() {
            self.output.line("");
            self.output.line("No fields provided. Profile not created.");
            return Ok(false);
        }

        self.output.line("");
        self.output.line(&format!("Creating profile: {}", name));
        self.output.line("");
        for (field, value) in &data {
            self.output
                .line(&format!("  {}: {}", value_text(field), value_text(value)));
        }

        let fragment = self.store.save(&name, &data)?;
        debug!(path = %fragment.display(), "Profile added");

        self.output.line("");
        self.output
            .line(&format!("OK Profile saved to profiles.d/{}.yml", name));
        Ok(true)
    }
}

/// Column text for a profile field, with `-` standing in for absent values.
fn field_text(profile: &Mapping, field: &str) -> String {
    match profile.get(field) {
        Some(Value::Null) | None => "-".to_string(),
        Some(value) => value_text(value),
    }
}

/// Scalar rendering for profile fields; non-scalars fall back to YAML.
fn value_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        other => serde_yaml_ng::to_string(other)
            .map(|s| s.trim_end().to_string())
            .unwrap_or_default(),
    }
}
