use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct SearchStationsInput {
    pub query: String,
}
