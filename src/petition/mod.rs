pub mod handlers;
pub mod model;
pub mod validation;
pub mod workflow;

pub use model::{
    CreatePetitionResponse, ExportDataUriResponse, ExportQuery, PaymentResponse, PetitionForm,
    PreviewResponse,
};
pub use validation::{ValidationError, ValidationErrors};
pub use workflow::{GateError, Petition, Preview};
