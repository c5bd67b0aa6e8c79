//! Deterministic identifiers derived from natural keys.
//!
//! Identifiers are UUID v5 values so that re-running the generator over the
//! same spreadsheets yields the same primary keys without a lookup table.

use uuid::Uuid;

const PURCHASE_ORDER_NAMESPACE_NAME: &str = "aestrak/purchase-order";
const QUANTITY_SURVEY_NAMESPACE_NAME: &str = "aestrak/quantity-survey";

/// Namespace for purchase-order identifiers, itself derived from the URL
/// namespace.
pub fn purchase_order_namespace() -> Uuid {
    Uuid::new_v5(&Uuid::NAMESPACE_URL, PURCHASE_ORDER_NAMESPACE_NAME.as_bytes())
}

/// Namespace for quantity-survey identifiers.
pub fn quantity_survey_namespace() -> Uuid {
    Uuid::new_v5(&Uuid::NAMESPACE_URL, QUANTITY_SURVEY_NAMESPACE_NAME.as_bytes())
}

/// Derives an identifier from a namespace and a name.
pub fn deterministic_uuid(namespace: &Uuid, name: &str) -> Uuid {
    Uuid::new_v5(namespace, name.as_bytes())
}

/// Identifier of the purchase order with the given (trimmed) order number.
pub fn purchase_order_id(po_number: &str) -> Uuid {
    deterministic_uuid(&purchase_order_namespace(), po_number)
}

/// Identifier of a quantity survey, keyed by `"{po_number}:{qs_number}"`.
pub fn quantity_survey_id(po_number: &str, qs_number: &str) -> Uuid {
    deterministic_uuid(
        &quantity_survey_namespace(),
        &format!("{po_number}:{qs_number}"),
    )
}
