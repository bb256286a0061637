use serde::{Deserialize, Serialize};

/// Assistant as listed by the backend directory.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssistantModel {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub plugins: Vec<PluginModel>,
}

/// Plugin attached to an assistant; its configuration travels as a field/value list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PluginModel {
    pub plugin_id: String,
    #[serde(default)]
    pub config: Vec<ConfigFieldModel>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfigFieldModel {
    pub field: String,
    #[serde(default)]
    pub value: serde_json::Value,
}
