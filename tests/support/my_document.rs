use firetype::Entity;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const COLLECTION: &str = "TEST_collection";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MyDocument {
    pub id: String,
    pub number_key: i64,
    pub string_key: String,
    pub bool_key: bool,
}

impl Entity for MyDocument {
    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }
}

/// A document with a fresh random id.
pub fn my_document(number_key: i64) -> MyDocument {
    MyDocument {
        id: Uuid::new_v4().to_string(),
        number_key,
        string_key: "Hello, World!".to_string(),
        bool_key: true,
    }
}
