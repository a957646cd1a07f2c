// DTOs for the billing cart

/// Payload for opening a new sale. A cart starts empty with blank customer
/// details, so there is nothing to carry yet.
#[derive(Debug, Clone, Default)]
pub struct CartCreate;

/// Payload for filling in the customer fields on the billing screen.
#[derive(Debug, Clone, Default)]
pub struct CustomerPatch {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}
