use crate::dtos::StatisticsDTO;
use serde::{Deserialize, Serialize};
use taskguide_domain::ID;

pub mod get_statistics {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    pub struct PathParams {
        pub user_id: ID,
    }

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub statistics: StatisticsDTO,
    }
}
