use std::{fmt, str::FromStr};

use crate::Error;

/// A tag naming a category of asynchronous billing occurrence.
///
/// The billing platform reports side effects of API calls over its bus as
/// notifications carrying one of these tags. Tests declare which tags an
/// operation should produce and the [`BusListener`](crate::BusListener)
/// matches arrivals against that declaration by kind alone; payload
/// identifiers travel separately in [`Meta`](crate::Meta).
///
/// The set is closed: new occurrences are modeled by adding variants, and
/// each variant has a stable wire label (see [`label`](Self::label)) used
/// by the push-notification channel.
///
/// # Example
///
/// ```rust
/// use eventgate::EventKind;
///
/// assert_eq!(EventKind::InvoiceCreation.label(), "INVOICE_CREATION");
/// assert_eq!("PAYMENT_SUCCESS".parse::<EventKind>().unwrap(), EventKind::PaymentSuccess);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EventKind {
    /// A new account was created.
    AccountCreation,
    /// An existing account was modified.
    AccountChange,
    /// A subscription was created.
    SubscriptionCreation,
    /// A subscription moved to a new phase (e.g. trial to evergreen).
    SubscriptionPhase,
    /// A subscription plan was changed.
    SubscriptionChange,
    /// A subscription was cancelled.
    SubscriptionCancel,
    /// A pending subscription cancellation was undone.
    SubscriptionUncancel,
    /// An entitlement blocking state changed (pause/resume, overdue blocks).
    BlockingState,
    /// An invoice was generated.
    InvoiceCreation,
    /// An invoice was adjusted after generation.
    InvoiceAdjustment,
    /// An upcoming-invoice notification was emitted.
    InvoiceNotification,
    /// A payment was applied to an invoice.
    InvoicePaymentSuccess,
    /// A payment attempt against an invoice failed.
    InvoicePaymentFailed,
    /// A standalone payment succeeded.
    PaymentSuccess,
    /// A standalone payment failed.
    PaymentFailed,
    /// A tag was attached to an object.
    TagCreation,
    /// A tag was removed from an object.
    TagDeletion,
    /// A custom field was attached to an object.
    CustomFieldCreation,
    /// A custom field was removed from an object.
    CustomFieldDeletion,
    /// An account's overdue state changed.
    OverdueChange,
    /// Per-tenant configuration was added or updated.
    TenantConfigChange,
    /// Per-tenant configuration was deleted.
    TenantConfigDeletion,
}

impl EventKind {
    /// Every kind, in declaration order.
    pub const ALL: &'static [EventKind] = &[
        EventKind::AccountCreation,
        EventKind::AccountChange,
        EventKind::SubscriptionCreation,
        EventKind::SubscriptionPhase,
        EventKind::SubscriptionChange,
        EventKind::SubscriptionCancel,
        EventKind::SubscriptionUncancel,
        EventKind::BlockingState,
        EventKind::InvoiceCreation,
        EventKind::InvoiceAdjustment,
        EventKind::InvoiceNotification,
        EventKind::InvoicePaymentSuccess,
        EventKind::InvoicePaymentFailed,
        EventKind::PaymentSuccess,
        EventKind::PaymentFailed,
        EventKind::TagCreation,
        EventKind::TagDeletion,
        EventKind::CustomFieldCreation,
        EventKind::CustomFieldDeletion,
        EventKind::OverdueChange,
        EventKind::TenantConfigChange,
        EventKind::TenantConfigDeletion,
    ];

    /// Returns the stable wire label for this kind.
    ///
    /// This is the identifier the push-notification channel carries;
    /// [`FromStr`] parses it back.
    pub const fn label(&self) -> &'static str {
        match self {
            EventKind::AccountCreation => "ACCOUNT_CREATION",
            EventKind::AccountChange => "ACCOUNT_CHANGE",
            EventKind::SubscriptionCreation => "SUBSCRIPTION_CREATION",
            EventKind::SubscriptionPhase => "SUBSCRIPTION_PHASE",
            EventKind::SubscriptionChange => "SUBSCRIPTION_CHANGE",
            EventKind::SubscriptionCancel => "SUBSCRIPTION_CANCEL",
            EventKind::SubscriptionUncancel => "SUBSCRIPTION_UNCANCEL",
            EventKind::BlockingState => "BLOCKING_STATE",
            EventKind::InvoiceCreation => "INVOICE_CREATION",
            EventKind::InvoiceAdjustment => "INVOICE_ADJUSTMENT",
            EventKind::InvoiceNotification => "INVOICE_NOTIFICATION",
            EventKind::InvoicePaymentSuccess => "INVOICE_PAYMENT_SUCCESS",
            EventKind::InvoicePaymentFailed => "INVOICE_PAYMENT_FAILED",
            EventKind::PaymentSuccess => "PAYMENT_SUCCESS",
            EventKind::PaymentFailed => "PAYMENT_FAILED",
            EventKind::TagCreation => "TAG_CREATION",
            EventKind::TagDeletion => "TAG_DELETION",
            EventKind::CustomFieldCreation => "CUSTOM_FIELD_CREATION",
            EventKind::CustomFieldDeletion => "CUSTOM_FIELD_DELETION",
            EventKind::OverdueChange => "OVERDUE_CHANGE",
            EventKind::TenantConfigChange => "TENANT_CONFIG_CHANGE",
            EventKind::TenantConfigDeletion => "TENANT_CONFIG_DELETION",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for EventKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EventKind::ALL
            .iter()
            .find(|kind| kind.label() == s)
            .copied()
            .ok_or_else(|| Error::UnknownEventKind(s.to_string()))
    }
}
