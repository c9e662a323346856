use std::sync::Arc;

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, DatabaseConnection, EntityTrait, QueryOrder,
};
use tracing::{info, instrument};

use crate::{
    dto::VendorPayload,
    entities::vendor::{self, Entity as VendorEntity},
    errors::ServiceError,
    events::{Event, EventSender},
    services::required,
};

#[derive(Clone)]
pub struct VendorService {
    db: Arc<DatabaseConnection>,
    events: Option<EventSender>,
}

impl VendorService {
    pub fn new(db: Arc<DatabaseConnection>, events: Option<EventSender>) -> Self {
        Self { db, events }
    }

    async fn emit(&self, event: Event) {
        if let Some(events) = &self.events {
            events.send(event).await;
        }
    }

    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<vendor::Model>, ServiceError> {
        let vendors = VendorEntity::find()
            .order_by_asc(vendor::Column::Name)
            .all(&*self.db)
            .await?;
        Ok(vendors)
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: i64) -> Result<vendor::Model, ServiceError> {
        VendorEntity::find_by_id(id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::not_found(format!("Vendor {}", id)))
    }

    #[instrument(skip(self, payload))]
    pub async fn create(&self, payload: VendorPayload) -> Result<vendor::Model, ServiceError> {
        let model = vendor::ActiveModel {
            name: Set(required(payload.name, "name")?),
            contact: Set(payload.contact),
            email: Set(payload.email),
            address: Set(payload.address),
            state: Set(payload.state),
            pincode: Set(payload.pincode),
            gst_number: Set(payload.gst_number),
            payment_terms: Set(payload.payment_terms),
            is_active: Set(payload.is_active.unwrap_or(true)),
            notes: Set(payload.notes),
            created_at: Set(Utc::now().into()),
            ..Default::default()
        };

        let vendor = model.insert(&*self.db).await?;
        info!(vendor_id = vendor.id, "Vendor created");
        self.emit(Event::VendorCreated(vendor.id)).await;
        Ok(vendor)
    }

    #[instrument(skip(self, payload))]
    pub async fn update(
        &self,
        id: i64,
        payload: VendorPayload,
    ) -> Result<vendor::Model, ServiceError> {
        let existing = self.get(id).await?;
        let mut model: vendor::ActiveModel = existing.into();

        if let Some(name) = payload.name {
            model.name = Set(name);
        }
        if payload.contact.is_some() {
            model.contact = Set(payload.contact);
        }
        if payload.email.is_some() {
            model.email = Set(payload.email);
        }
        if payload.address.is_some() {
            model.address = Set(payload.address);
        }
        if payload.state.is_some() {
            model.state = Set(payload.state);
        }
        if payload.pincode.is_some() {
            model.pincode = Set(payload.pincode);
        }
        if payload.gst_number.is_some() {
            model.gst_number = Set(payload.gst_number);
        }
        if payload.payment_terms.is_some() {
            model.payment_terms = Set(payload.payment_terms);
        }
        if let Some(is_active) = payload.is_active {
            model.is_active = Set(is_active);
        }
        if payload.notes.is_some() {
            model.notes = Set(payload.notes);
        }

        let vendor = model.update(&*self.db).await?;
        info!(vendor_id = vendor.id, "Vendor updated");
        self.emit(Event::VendorUpdated(vendor.id)).await;
        Ok(vendor)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: i64) -> Result<(), ServiceError> {
        let existing = self.get(id).await?;
        VendorEntity::delete_by_id(existing.id).exec(&*self.db).await?;
        info!(vendor_id = id, "Vendor deleted");
        self.emit(Event::VendorDeleted(id)).await;
        Ok(())
    }
}
