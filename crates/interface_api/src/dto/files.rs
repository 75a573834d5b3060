//! Property file DTOs

use serde::{Deserialize, Serialize};
use validator::Validate;

use core_kernel::Money;
use domain_registry::{EnrollmentForm, RegistrySummary};

#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    /// Search term; absent or empty lists every file
    pub q: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct EnrollFileRequest {
    #[validate(length(min = 1, max = 64))]
    pub file_no: String,
    #[validate(length(max = 200))]
    #[serde(default)]
    pub owner_name: String,
    #[validate(length(max = 32))]
    #[serde(default, rename = "ownerCNIC")]
    pub owner_cnic: String,
    #[validate(length(max = 200))]
    #[serde(default)]
    pub father_name: String,
    #[validate(length(max = 32))]
    #[serde(default)]
    pub cell_no: String,
    #[serde(default)]
    pub address: String,
    pub plot_size: Option<String>,
    pub plot_no: Option<String>,
    pub block: Option<String>,
    pub park: Option<String>,
    pub corner: Option<String>,
    pub main_boulevard: Option<String>,
    pub plot_value: Option<Money>,
    pub reg_date: Option<String>,
    pub currency_no: Option<String>,
}

impl From<EnrollFileRequest> for EnrollmentForm {
    fn from(request: EnrollFileRequest) -> Self {
        EnrollmentForm {
            file_no: request.file_no,
            owner_name: request.owner_name,
            owner_cnic: request.owner_cnic,
            father_name: request.father_name,
            cell_no: request.cell_no,
            address: request.address,
            plot_size: request.plot_size,
            plot_no: request.plot_no,
            block: request.block,
            park: request.park,
            corner: request.corner,
            main_boulevard: request.main_boulevard,
            plot_value: request.plot_value,
            reg_date: request.reg_date,
            currency_no: request.currency_no,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct FileListResponse {
    pub count: usize,
    pub files: Vec<RegistrySummary>,
}
