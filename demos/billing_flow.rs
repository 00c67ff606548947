//! Billing Flow Example
//!
//! Demonstrates the declare/trigger/await cycle against a simulated
//! billing server. The "server" here is a spawned task that receives
//! commands over a channel and reports side effects through a
//! [`NotificationSink`], exactly the role the real system's push
//! notification callbacks play in an integration test.
//!
//! # Key Concepts Demonstrated
//!
//! ## 1. The Declare/Trigger/Await Cycle
//!
//! Each phase pushes the expected event kinds, performs the triggering
//! call, and awaits `assert_listener_status()`. A satisfied wait clears
//! the queues, so phases chain without explicit resets.
//!
//! ## 2. Flaky Bootstrap
//!
//! Tenant provisioning races the callback-channel registration, so the
//! first phase uses `flaky_assert_listener_status()`: the missing second
//! config event degrades to a warning instead of failing the run.
//!
//! ## 3. Post-Wait Inspection
//!
//! After a satisfied wait the per-phase log is cleared, but `history_of`
//! still exposes which objects the awaited events referred to.
//!
//! Run with:
//!
//! ```text
//! cargo run --example billing_flow
//! ```

use std::time::Duration;

use eventgate::{BusListener, EventKind, Meta, NotificationSink, Result};
use tokio::sync::mpsc;
use uuid::Uuid;

/// Operations the simulated billing server accepts.
#[derive(Debug)]
enum Command {
    UploadCatalog,
    CreateAccount,
    CreateSubscription { account_id: Uuid },
    PayInvoice { account_id: Uuid, invoice_id: Uuid },
}

/// The simulated system under test: consumes commands, emits bus
/// notifications after a small delay, the way a real server reports side
/// effects asynchronously.
async fn billing_server(mut commands: mpsc::Receiver<Command>, sink: NotificationSink) {
    while let Some(command) = commands.recv().await {
        tokio::time::sleep(Duration::from_millis(25)).await;
        match command {
            Command::UploadCatalog => {
                // Only one of the two per-tenant config events makes it out:
                // the callback channel is still registering. This is the
                // race the flaky wait tolerates.
                sink.notify(EventKind::TenantConfigChange, Meta::empty());
            }
            Command::CreateAccount => {
                let account_id = Uuid::new_v4();
                sink.notify(EventKind::AccountCreation, Meta::new(Some(account_id), Some(account_id)));
            }
            Command::CreateSubscription { account_id } => {
                sink.notify(
                    EventKind::SubscriptionCreation,
                    Meta::new(Some(Uuid::new_v4()), Some(account_id)),
                );
                // First invoice is generated immediately, out of order with
                // the subscription event as far as the bus is concerned.
                sink.notify(
                    EventKind::InvoiceCreation,
                    Meta::new(Some(Uuid::new_v4()), Some(account_id)),
                );
            }
            Command::PayInvoice {
                account_id,
                invoice_id,
            } => {
                sink.notify(
                    EventKind::PaymentSuccess,
                    Meta::new(Some(Uuid::new_v4()), Some(account_id)),
                );
                sink.notify(
                    EventKind::InvoicePaymentSuccess,
                    Meta::new(Some(invoice_id), Some(account_id)),
                );
            }
        }
    }
}

#[tokio::main]
async fn main() -> Result {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("eventgate=debug")),
        )
        .init();

    let (mut listener, sink) = BusListener::new();
    let (commands, command_rx) = mpsc::channel(16);
    tokio::spawn(billing_server(command_rx, sink));

    // Phase 1: tenant bootstrap. Two config changes are expected but the
    // channel races registration, so tolerate a partial delivery.
    listener.push_expected_events(&[
        EventKind::TenantConfigChange,
        EventKind::TenantConfigChange,
    ]);
    commands.send(Command::UploadCatalog).await.expect("server alive");
    listener
        .flaky_assert_listener_status()
        .within(Duration::from_millis(500))
        .await?;
    println!("bootstrap done (state: {})", listener.state());

    // Phase 2: account creation.
    listener.push_expected_event(EventKind::AccountCreation);
    commands.send(Command::CreateAccount).await.expect("server alive");
    listener.assert_listener_status().await?;

    let account_id = listener.history_of(EventKind::AccountCreation)[0]
        .meta()
        .account_id()
        .expect("account event carries its account id");
    println!("account created: {account_id}");

    // Phase 3: subscription plus first invoice, arrival order unknown.
    listener.push_expected_events(&[
        EventKind::SubscriptionCreation,
        EventKind::InvoiceCreation,
    ]);
    commands
        .send(Command::CreateSubscription { account_id })
        .await
        .expect("server alive");
    listener.assert_listener_status().await?;

    let invoice_id = listener.history_of(EventKind::InvoiceCreation)[0]
        .meta()
        .object_id()
        .expect("invoice event carries the invoice id");
    println!("subscription active, first invoice: {invoice_id}");

    // Phase 4: pay the invoice; both payment events must arrive.
    listener.push_expected_events(&[
        EventKind::PaymentSuccess,
        EventKind::InvoicePaymentSuccess,
    ]);
    commands
        .send(Command::PayInvoice {
            account_id,
            invoice_id,
        })
        .await
        .expect("server alive");
    listener.assert_listener_status().await?;
    println!("invoice paid ({} events observed)", listener.history().len());

    Ok(())
}
