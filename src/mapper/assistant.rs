use std::collections::BTreeMap;

use crate::{
    model::{AssistantModel, ConfigFieldModel, PluginModel},
    workflow::assistant::{Assistant, AssistantPlugin},
};

/// Field/value list to map. A repeated field keeps its last value.
pub fn entries_to_map(entries: &[ConfigFieldModel]) -> BTreeMap<String, serde_json::Value> {
    entries.iter().map(|e| (e.field.clone(), e.value.clone())).collect()
}

/// Map to field/value list, ordered by field.
pub fn map_to_entries(map: &BTreeMap<String, serde_json::Value>) -> Vec<ConfigFieldModel> {
    map.iter()
        .map(|(field, value)| ConfigFieldModel {
            field: field.clone(),
            value: value.clone(),
        })
        .collect()
}

impl From<&PluginModel> for AssistantPlugin {
    fn from(dto: &PluginModel) -> Self {
        AssistantPlugin {
            plugin_id: dto.plugin_id.clone(),
            config: entries_to_map(&dto.config),
        }
    }
}

impl From<&AssistantPlugin> for PluginModel {
    fn from(plugin: &AssistantPlugin) -> Self {
        PluginModel {
            plugin_id: plugin.plugin_id.clone(),
            config: map_to_entries(&plugin.config),
        }
    }
}

impl From<&AssistantModel> for Assistant {
    fn from(dto: &AssistantModel) -> Self {
        Assistant {
            id: dto.id.clone(),
            name: dto.name.clone(),
            description: dto.description.clone(),
            plugins: dto.plugins.iter().map(AssistantPlugin::from).collect(),
        }
    }
}

impl From<&Assistant> for AssistantModel {
    fn from(assistant: &Assistant) -> Self {
        AssistantModel {
            id: assistant.id.clone(),
            name: assistant.name.clone(),
            description: assistant.description.clone(),
            plugins: assistant.plugins.iter().map(PluginModel::from).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::mapper::WorkflowDtoMapper;

    fn field(
        name: &str,
        value: serde_json::Value,
    ) -> ConfigFieldModel {
        ConfigFieldModel {
            field: name.to_string(),
            value,
        }
    }

    #[test]
    fn test_entries_to_map_last_duplicate_wins() {
        let map = entries_to_map(&[field("model", json!("small")), field("temperature", json!(0.2)), field("model", json!("large"))]);
        assert_eq!(map.len(), 2);
        assert_eq!(map["model"], json!("large"));
        assert_eq!(map["temperature"], json!(0.2));
    }

    #[test]
    fn test_map_to_entries_is_sorted() {
        let mut map = BTreeMap::new();
        map.insert("zeta".to_string(), json!(1));
        map.insert("alpha".to_string(), json!({"nested": true}));
        let entries = map_to_entries(&map);
        assert_eq!(entries, vec![field("alpha", json!({"nested": true})), field("zeta", json!(1))]);
    }

    #[test]
    fn test_assistant_plugins_map_both_ways() {
        let dto: AssistantModel = serde_json::from_value(json!({
            "id": "a1",
            "name": "Search",
            "plugins": [
                {"plugin_id": "web", "config": [{"field": "max_results", "value": 5}, {"field": "safe", "value": true}]}
            ]
        }))
        .unwrap();

        let assistant = WorkflowDtoMapper::assistant_to_domain(&dto);
        assert_eq!(assistant.description, "");
        assert_eq!(assistant.plugins[0].config["max_results"], json!(5));

        let back = WorkflowDtoMapper::assistant_to_wire(&assistant);
        assert_eq!(back, dto);
    }
}
