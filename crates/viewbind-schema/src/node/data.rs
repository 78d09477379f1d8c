use serde::Serialize;

///
/// DataEntry
///
/// The component type chosen to render one data type.
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct DataEntry {
    pub data_type: String,
    pub component_type: String,
}
