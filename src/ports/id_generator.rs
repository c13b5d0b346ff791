//! Id generator port.
//!
//! Options and criteria get their ids on the client side before they are
//! stored. Injecting the source lets tests use predictable ids.

use uuid::Uuid;

use crate::domain::foundation::{CriterionId, OptionId};

/// Source of fresh identifiers.
pub trait IdGenerator: Send + Sync {
    fn next_uuid(&self) -> Uuid;

    fn next_option_id(&self) -> OptionId {
        OptionId::from_uuid(self.next_uuid())
    }

    fn next_criterion_id(&self) -> CriterionId {
        CriterionId::from_uuid(self.next_uuid())
    }
}
