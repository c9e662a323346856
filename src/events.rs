use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::{info, warn};

/// Events emitted by the services after state changes commit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Event {
    VendorCreated(i64),
    VendorUpdated(i64),
    VendorDeleted(i64),

    FilamentCreated(i64),
    FilamentUpdated(i64),
    FilamentDeleted(i64),
    StockAdjusted {
        filament_id: i64,
        delta_kg: Decimal,
        new_stock_kg: Decimal,
    },

    OrderCreated(i64),
    OrderUpdated(i64),
    OrderDeleted(i64),
    PaymentStatusChanged {
        order_id: i64,
        new_status: String,
    },

    PaymentRecorded {
        payment_id: i64,
        order_id: i64,
        amount: Decimal,
    },
    PaymentDeleted {
        payment_id: i64,
        order_id: i64,
    },

    ProcurementCreated(i64),
    ProcurementUpdated(i64),
    ProcurementDeleted(i64),
    ProcurementDelivered {
        procurement_id: i64,
        filament_id: i64,
        quantity_kg: Decimal,
    },

    PrintUsageRecorded {
        usage_id: i64,
        order_id: i64,
        filament_id: i64,
        quantity_kg: Decimal,
    },
    PrintUsageDeleted {
        usage_id: i64,
        filament_id: i64,
    },
}

/// Cloneable handle used by services to publish events.
#[derive(Debug, Clone)]
pub struct EventSender {
    sender: mpsc::Sender<Event>,
}

impl EventSender {
    pub fn new(sender: mpsc::Sender<Event>) -> Self {
        Self { sender }
    }

    /// Sends an event. Failures are reported but must never fail the
    /// business operation that produced the event.
    pub async fn send(&self, event: Event) {
        if let Err(e) = self.sender.send(event).await {
            warn!("Failed to send event: {}", e);
        }
    }
}

/// Creates a bounded event channel.
pub fn event_channel(capacity: usize) -> (EventSender, mpsc::Receiver<Event>) {
    let (tx, rx) = mpsc::channel(capacity);
    (EventSender::new(tx), rx)
}

/// Consumes events and logs them. Runs until every sender is dropped.
pub async fn process_events(mut rx: mpsc::Receiver<Event>) {
    while let Some(event) = rx.recv().await {
        info!(?event, "domain event");
    }
    info!("Event channel closed, stopping event processor");
}
