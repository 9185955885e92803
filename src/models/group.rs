use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Member {
    #[serde(deserialize_with = "super::id_from_any")]
    pub id: String,
    pub nome: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub papel: Option<String>,
}

impl Member {
    pub fn is_owner(&self) -> bool {
        matches!(self.papel.as_deref(), Some("dono") | Some("owner"))
    }
}

/// Payload of `GET /api/groups/{id}/dashboard`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Group {
    pub nome_grupo: String,
    #[serde(default)]
    pub plano: Option<String>,
    #[serde(default)]
    pub membros: Vec<Member>,
    #[serde(default, deserialize_with = "super::opt_id_from_any")]
    pub current_user_id: Option<String>,
}

impl Group {
    /// Whether the viewing user owns the group
    pub fn viewer_is_owner(&self) -> bool {
        let Some(me) = self.current_user_id.as_deref() else {
            return false;
        };
        self.membros.iter().any(|m| m.id == me && m.is_owner())
    }

    pub fn member(&self, id: &str) -> Option<&Member> {
        self.membros.iter().find(|m| m.id == id)
    }
}
