use std::fmt;

use serde::{Deserialize, Serialize};

/// Lifecycle of a collection as recorded by the root coordinator.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CollectionState {
    #[default]
    Created,
    Creating,
    Dropping,
    Dropped,
}

impl fmt::Display for CollectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CollectionState::Created => "CollectionCreated",
            CollectionState::Creating => "CollectionCreating",
            CollectionState::Dropping => "CollectionDropping",
            CollectionState::Dropped => "CollectionDropped",
        };
        f.write_str(name)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConsistencyLevel {
    Strong,
    Session,
    #[default]
    Bounded,
    Eventually,
    Customized,
}

impl fmt::Display for ConsistencyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DataType {
    Bool,
    Int8,
    Int16,
    Int32,
    Int64,
    Float,
    Double,
    VarChar,
    Json,
    Array,
    BinaryVector,
    FloatVector,
    Float16Vector,
    SparseFloatVector,
}

impl DataType {
    pub fn is_vector(&self) -> bool {
        matches!(
            self,
            DataType::BinaryVector
                | DataType::FloatVector
                | DataType::Float16Vector
                | DataType::SparseFloatVector
        )
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyValuePair {
    pub key: String,
    pub value: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSchema {
    pub field_id: i64,
    pub name: String,
    pub data_type: DataType,
    #[serde(default)]
    pub is_primary_key: bool,
    #[serde(default)]
    pub type_params: Vec<KeyValuePair>,
}

impl FieldSchema {
    pub fn new(field_id: i64, name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            field_id,
            name: name.into(),
            data_type,
            is_primary_key: false,
            type_params: Vec::new(),
        }
    }

    pub fn primary_key(mut self) -> Self {
        self.is_primary_key = true;
        self
    }

    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.type_params.push(KeyValuePair {
            key: key.into(),
            value: value.into(),
        });
        self
    }

    /// Vector dimension, when declared through the `dim` type param.
    pub fn dim(&self) -> Option<&str> {
        self.type_params
            .iter()
            .find(|kv| kv.key == "dim")
            .map(|kv| kv.value.as_str())
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionSchema {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub auto_id: bool,
    #[serde(default)]
    pub fields: Vec<FieldSchema>,
}

/// A collection record. `id` is globally unique; the name is not, since a
/// dropped collection may linger while a new one reuses its name.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collection {
    pub id: i64,
    #[serde(default)]
    pub db_id: i64,
    #[serde(default)]
    pub state: CollectionState,
    pub schema: CollectionSchema,
    #[serde(default)]
    pub shards_num: i32,
    #[serde(default)]
    pub consistency_level: ConsistencyLevel,
    #[serde(default)]
    pub virtual_channels: Vec<String>,
    /// Hybrid timestamp of creation.
    #[serde(default)]
    pub create_time: u64,
}

impl Collection {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            db_id: 0,
            state: CollectionState::Created,
            schema: CollectionSchema {
                name: name.into(),
                ..CollectionSchema::default()
            },
            shards_num: 1,
            consistency_level: ConsistencyLevel::Bounded,
            virtual_channels: Vec::new(),
            create_time: 0,
        }
    }

    pub fn name(&self) -> &str {
        &self.schema.name
    }

    pub fn with_state(mut self, state: CollectionState) -> Self {
        self.state = state;
        self
    }

    pub fn with_field(mut self, field: FieldSchema) -> Self {
        self.schema.fields.push(field);
        self
    }

    pub fn with_create_time(mut self, ts: u64) -> Self {
        self.create_time = ts;
        self
    }
}
