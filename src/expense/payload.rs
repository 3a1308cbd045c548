//! Request bodies for creating and updating expenses.
//!
//! Older clients send `home_id`, `utility_type`, `bill_date` and `added_by`.
//! Those names are accepted as aliases here so nothing past this module ever
//! has to know about them.

use serde::{Deserialize, Serialize};
use time::Date;

use crate::{
    Error,
    expense::{ExpenseFields, GroupId},
    money::Money,
};

/// The JSON body for updating an expense. Every field is required.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpensePayload {
    #[serde(alias = "utility_type")]
    pub category: String,
    pub amount: Money,
    #[serde(alias = "bill_date")]
    pub occurred_on: Date,
    #[serde(alias = "added_by")]
    pub paid_by: String,
}

impl TryFrom<ExpensePayload> for ExpenseFields {
    type Error = Error;

    fn try_from(payload: ExpensePayload) -> Result<Self, Self::Error> {
        ExpenseFields::new(
            &payload.category,
            payload.amount,
            payload.occurred_on,
            &payload.paid_by,
        )
    }
}

/// The JSON body for creating an expense.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewExpensePayload {
    #[serde(alias = "home_id")]
    pub group_id: String,
    #[serde(alias = "utility_type")]
    pub category: String,
    pub amount: Money,
    #[serde(alias = "bill_date")]
    pub occurred_on: Date,
    #[serde(alias = "added_by")]
    pub paid_by: String,
}

impl NewExpensePayload {
    /// Validate the payload, splitting it into the owning group and the expense fields.
    ///
    /// # Errors
    /// Returns an error if the group ID is blank or any of the expense fields
    /// are invalid, see [ExpenseFields::new].
    pub fn validate(self) -> Result<(GroupId, ExpenseFields), Error> {
        let group_id = GroupId::new(&self.group_id)?;
        let fields = ExpenseFields::new(
            &self.category,
            self.amount,
            self.occurred_on,
            &self.paid_by,
        )?;

        Ok((group_id, fields))
    }
}
