use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Achievement {
    pub tipo_medalha: String,
    #[serde(default)]
    pub descricao: String,
    #[serde(default)]
    pub data_conquista: Option<String>,
}
