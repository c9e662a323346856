use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::Datelike;
use rust_decimal::Decimal;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect,
};
use serde::Serialize;
use tracing::instrument;

use crate::{
    entities::{
        order::{self, Entity as OrderEntity},
        payment::Entity as PaymentEntity,
        procurement::{self, Entity as ProcurementEntity},
    },
    errors::ServiceError,
    services::{
        filaments::{FilamentService, StockByType},
        payments::PaymentService,
    },
};

const UPCOMING_ETA_LIMIT: u64 = 10;

/// Headline numbers for the dashboard landing view.
#[derive(Debug, Serialize)]
pub struct DashboardStats {
    pub inventory_value: Decimal,
    pub stock_by_type: Vec<StockByType>,
    pub active_orders: u64,
    pub pending_receivables: Decimal,
    pub total_revenue: Decimal,
}

/// Deliveries expected soon, from both sides of the business.
#[derive(Debug, Serialize)]
pub struct UpcomingEtas {
    pub procurement: Vec<procurement::Model>,
    pub orders: Vec<order::Model>,
}

#[derive(Debug, Serialize)]
pub struct CountByKey {
    pub key: String,
    pub count: u64,
}

#[derive(Debug, Serialize)]
pub struct RevenueByMonth {
    pub month: String,
    pub revenue: Decimal,
}

/// Series backing the dashboard charts.
#[derive(Debug, Serialize)]
pub struct ChartData {
    pub orders_by_status: Vec<CountByKey>,
    pub orders_by_payment_status: Vec<CountByKey>,
    pub stock_by_type: Vec<StockByType>,
    pub revenue_by_month: Vec<RevenueByMonth>,
}

#[derive(Clone)]
pub struct DashboardService {
    db: Arc<DatabaseConnection>,
    filaments: Arc<FilamentService>,
    payments: Arc<PaymentService>,
}

impl DashboardService {
    pub fn new(
        db: Arc<DatabaseConnection>,
        filaments: Arc<FilamentService>,
        payments: Arc<PaymentService>,
    ) -> Self {
        Self {
            db,
            filaments,
            payments,
        }
    }

    #[instrument(skip(self))]
    pub async fn stats(&self) -> Result<DashboardStats, ServiceError> {
        let active_orders = OrderEntity::find()
            .filter(order::Column::Status.is_in(["in_progress", "completed"]))
            .count(&*self.db);

        let (inventory_value, stock_by_type, active_orders, receivables, total_revenue) = tokio::try_join!(
            self.filaments.inventory_value(),
            self.filaments.stock_by_type(),
            async { active_orders.await.map_err(ServiceError::DatabaseError) },
            self.payments.pending_receivables(),
            self.payments.total_revenue(),
        )?;

        Ok(DashboardStats {
            inventory_value,
            stock_by_type,
            active_orders,
            pending_receivables: receivables.total_receivable,
            total_revenue,
        })
    }

    /// The next deliveries due: undelivered purchases and open orders, each
    /// capped at ten rows, soonest ETA first.
    #[instrument(skip(self))]
    pub async fn upcoming_etas(&self) -> Result<UpcomingEtas, ServiceError> {
        let procurement = ProcurementEntity::find()
            .filter(procurement::Column::FinalDeliveryDate.is_null())
            .filter(procurement::Column::EtaDelivery.is_not_null())
            .order_by_asc(procurement::Column::EtaDelivery)
            .limit(UPCOMING_ETA_LIMIT)
            .all(&*self.db)
            .await?;

        let orders = OrderEntity::find()
            .filter(order::Column::Status.is_in(["in_progress", "completed"]))
            .filter(order::Column::EtaDelivery.is_not_null())
            .order_by_asc(order::Column::EtaDelivery)
            .limit(UPCOMING_ETA_LIMIT)
            .all(&*self.db)
            .await?;

        Ok(UpcomingEtas {
            procurement,
            orders,
        })
    }

    #[instrument(skip(self))]
    pub async fn chart_data(&self) -> Result<ChartData, ServiceError> {
        let orders = OrderEntity::find().all(&*self.db).await?;
        let payments = PaymentEntity::find().all(&*self.db).await?;
        let stock_by_type = self.filaments.stock_by_type().await?;

        let mut by_status: BTreeMap<String, u64> = BTreeMap::new();
        let mut by_payment_status: BTreeMap<String, u64> = BTreeMap::new();
        for o in &orders {
            *by_status.entry(o.status.clone()).or_insert(0) += 1;
            *by_payment_status
                .entry(o.payment_status.clone())
                .or_insert(0) += 1;
        }

        let mut by_month: BTreeMap<String, Decimal> = BTreeMap::new();
        for p in &payments {
            let month = format!("{:04}-{:02}", p.payment_date.year(), p.payment_date.month());
            *by_month.entry(month).or_insert(Decimal::ZERO) += p.amount;
        }

        Ok(ChartData {
            orders_by_status: counts(by_status),
            orders_by_payment_status: counts(by_payment_status),
            stock_by_type,
            revenue_by_month: by_month
                .into_iter()
                .map(|(month, revenue)| RevenueByMonth { month, revenue })
                .collect(),
        })
    }
}

fn counts(map: BTreeMap<String, u64>) -> Vec<CountByKey> {
    map.into_iter()
        .map(|(key, count)| CountByKey { key, count })
        .collect()
}
