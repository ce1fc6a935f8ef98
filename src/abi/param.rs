/// A single input or output parameter of an ABI entry.
///
/// Tuple components and event `indexed` markers appear in artifacts but
/// are irrelevant here: compound types stay opaque, so the raw type string
/// is all the planner ever inspects.
#[derive(Deserialize, PartialEq, Eq, Debug, Clone)]
pub struct Param {
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type")]
    pub type_: String,
}

impl Param {
    pub fn new(name: &str, type_: &str) -> Param {
        Param {
            name: name.to_owned(),
            type_: type_.to_owned(),
        }
    }
}
