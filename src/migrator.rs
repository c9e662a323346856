use sea_orm_migration::prelude::*;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240201_000001_create_vendors_table::Migration),
            Box::new(m20240201_000002_create_filaments_table::Migration),
            Box::new(m20240201_000003_create_orders_table::Migration),
            Box::new(m20240201_000004_create_payments_table::Migration),
            Box::new(m20240201_000005_create_procurement_table::Migration),
            Box::new(m20240201_000006_create_print_usage_table::Migration),
        ]
    }
}

mod m20240201_000001_create_vendors_table {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240201_000001_create_vendors_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Vendors::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Vendors::Id)
                                .big_integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(Vendors::Name).string().not_null())
                        .col(ColumnDef::new(Vendors::Contact).string().null())
                        .col(ColumnDef::new(Vendors::Email).string().null())
                        .col(ColumnDef::new(Vendors::Address).string().null())
                        .col(ColumnDef::new(Vendors::State).string().null())
                        .col(ColumnDef::new(Vendors::Pincode).string().null())
                        .col(ColumnDef::new(Vendors::GstNumber).string().null())
                        .col(ColumnDef::new(Vendors::PaymentTerms).string().null())
                        .col(
                            ColumnDef::new(Vendors::IsActive)
                                .boolean()
                                .not_null()
                                .default(true),
                        )
                        .col(ColumnDef::new(Vendors::Notes).string().null())
                        .col(
                            ColumnDef::new(Vendors::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Vendors::Table).to_owned())
                .await
        }
    }

    #[derive(Iden)]
    pub enum Vendors {
        Table,
        Id,
        Name,
        Contact,
        Email,
        Address,
        State,
        Pincode,
        GstNumber,
        PaymentTerms,
        IsActive,
        Notes,
        CreatedAt,
    }
}

mod m20240201_000002_create_filaments_table {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240201_000002_create_filaments_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Filaments::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Filaments::Id)
                                .big_integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(Filaments::FilamentType).string().not_null())
                        .col(ColumnDef::new(Filaments::Brand).string().not_null())
                        .col(ColumnDef::new(Filaments::Color).string().not_null())
                        .col(ColumnDef::new(Filaments::DiameterMm).decimal_len(6, 2).null())
                        .col(
                            ColumnDef::new(Filaments::WeightPerSpoolKg)
                                .decimal_len(10, 3)
                                .null(),
                        )
                        .col(
                            ColumnDef::new(Filaments::CostPerKg)
                                .decimal_len(12, 2)
                                .not_null(),
                        )
                        .col(ColumnDef::new(Filaments::VendorId).big_integer().null())
                        .col(
                            ColumnDef::new(Filaments::CurrentStockKg)
                                .decimal_len(10, 3)
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(Filaments::MinStockAlertKg)
                                .decimal_len(10, 3)
                                .null(),
                        )
                        .col(ColumnDef::new(Filaments::PrintTempMin).integer().null())
                        .col(ColumnDef::new(Filaments::PrintTempMax).integer().null())
                        .col(ColumnDef::new(Filaments::BedTemp).integer().null())
                        .col(ColumnDef::new(Filaments::QualityGrade).string().null())
                        .col(
                            ColumnDef::new(Filaments::IsActive)
                                .boolean()
                                .not_null()
                                .default(true),
                        )
                        .col(
                            ColumnDef::new(Filaments::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_filaments_vendor_id")
                        .table(Filaments::Table)
                        .col(Filaments::VendorId)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Filaments::Table).to_owned())
                .await
        }
    }

    #[derive(Iden)]
    pub enum Filaments {
        Table,
        Id,
        FilamentType,
        Brand,
        Color,
        DiameterMm,
        WeightPerSpoolKg,
        CostPerKg,
        VendorId,
        CurrentStockKg,
        MinStockAlertKg,
        PrintTempMin,
        PrintTempMax,
        BedTemp,
        QualityGrade,
        IsActive,
        CreatedAt,
    }
}

mod m20240201_000003_create_orders_table {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240201_000003_create_orders_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Orders::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Orders::Id)
                                .big_integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(Orders::CustomerName).string().not_null())
                        .col(ColumnDef::new(Orders::CustomerEmail).string().null())
                        .col(ColumnDef::new(Orders::ContactNumber).string().null())
                        .col(ColumnDef::new(Orders::DeliveryAddress).string().null())
                        .col(ColumnDef::new(Orders::OrderDescription).string().null())
                        .col(ColumnDef::new(Orders::PrintType).string().null())
                        .col(ColumnDef::new(Orders::FilamentType).string().null())
                        .col(ColumnDef::new(Orders::FilamentColor).string().null())
                        .col(
                            ColumnDef::new(Orders::EstimatedQuantityUnits)
                                .integer()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(Orders::EstimatedFilamentUsageKg)
                                .decimal_len(10, 3)
                                .null(),
                        )
                        .col(ColumnDef::new(Orders::OrderDate).date().not_null())
                        .col(ColumnDef::new(Orders::EtaDelivery).date().null())
                        .col(ColumnDef::new(Orders::FinalDeliveryDate).date().null())
                        .col(
                            ColumnDef::new(Orders::TotalAmount)
                                .decimal_len(12, 2)
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Orders::AdvancePercentage)
                                .decimal_len(5, 2)
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(Orders::DiscountPercentage)
                                .decimal_len(5, 2)
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(Orders::DiscountAmount)
                                .decimal_len(12, 2)
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(Orders::GstPercentage)
                                .decimal_len(5, 2)
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(Orders::GstAmount)
                                .decimal_len(12, 2)
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(Orders::AdvanceAmount)
                                .decimal_len(12, 2)
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(Orders::BalanceAmount)
                                .decimal_len(12, 2)
                                .not_null()
                                .default(0),
                        )
                        .col(ColumnDef::new(Orders::PaymentStatus).string().not_null())
                        .col(ColumnDef::new(Orders::Priority).string().not_null())
                        .col(ColumnDef::new(Orders::Status).string().not_null())
                        .col(ColumnDef::new(Orders::Notes).string().null())
                        .col(
                            ColumnDef::new(Orders::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_orders_status")
                        .table(Orders::Table)
                        .col(Orders::Status)
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_orders_payment_status")
                        .table(Orders::Table)
                        .col(Orders::PaymentStatus)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Orders::Table).to_owned())
                .await
        }
    }

    #[derive(Iden)]
    pub enum Orders {
        Table,
        Id,
        CustomerName,
        CustomerEmail,
        ContactNumber,
        DeliveryAddress,
        OrderDescription,
        PrintType,
        FilamentType,
        FilamentColor,
        EstimatedQuantityUnits,
        EstimatedFilamentUsageKg,
        OrderDate,
        EtaDelivery,
        FinalDeliveryDate,
        TotalAmount,
        AdvancePercentage,
        DiscountPercentage,
        DiscountAmount,
        GstPercentage,
        GstAmount,
        AdvanceAmount,
        BalanceAmount,
        PaymentStatus,
        Priority,
        Status,
        Notes,
        CreatedAt,
    }
}

mod m20240201_000004_create_payments_table {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240201_000004_create_payments_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Payments::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Payments::Id)
                                .big_integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(Payments::OrderId).big_integer().not_null())
                        .col(
                            ColumnDef::new(Payments::Amount)
                                .decimal_len(12, 2)
                                .not_null(),
                        )
                        .col(ColumnDef::new(Payments::PaymentType).string().not_null())
                        .col(ColumnDef::new(Payments::PaymentMethod).string().null())
                        .col(ColumnDef::new(Payments::PaymentDate).date().not_null())
                        .col(ColumnDef::new(Payments::TransactionRef).string().null())
                        .col(ColumnDef::new(Payments::Notes).string().null())
                        .col(
                            ColumnDef::new(Payments::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_payments_order_id")
                        .table(Payments::Table)
                        .col(Payments::OrderId)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Payments::Table).to_owned())
                .await
        }
    }

    #[derive(Iden)]
    pub enum Payments {
        Table,
        Id,
        OrderId,
        Amount,
        PaymentType,
        PaymentMethod,
        PaymentDate,
        TransactionRef,
        Notes,
        CreatedAt,
    }
}

mod m20240201_000005_create_procurement_table {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240201_000005_create_procurement_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Procurement::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Procurement::Id)
                                .big_integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(
                            ColumnDef::new(Procurement::VendorId)
                                .big_integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Procurement::FilamentId)
                                .big_integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Procurement::QuantityKg)
                                .decimal_len(10, 3)
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Procurement::CostPerKg)
                                .decimal_len(12, 2)
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Procurement::TotalAmount)
                                .decimal_len(12, 2)
                                .not_null(),
                        )
                        .col(ColumnDef::new(Procurement::OrderDate).date().null())
                        .col(ColumnDef::new(Procurement::EtaDelivery).date().null())
                        .col(ColumnDef::new(Procurement::FinalDeliveryDate).date().null())
                        .col(ColumnDef::new(Procurement::InvoiceNumber).string().null())
                        .col(ColumnDef::new(Procurement::TrackingNumber).string().null())
                        .col(
                            ColumnDef::new(Procurement::PaymentStatus)
                                .string()
                                .not_null(),
                        )
                        .col(ColumnDef::new(Procurement::Status).string().not_null())
                        .col(ColumnDef::new(Procurement::Notes).string().null())
                        .col(
                            ColumnDef::new(Procurement::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_procurement_filament_id")
                        .table(Procurement::Table)
                        .col(Procurement::FilamentId)
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_procurement_status")
                        .table(Procurement::Table)
                        .col(Procurement::Status)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Procurement::Table).to_owned())
                .await
        }
    }

    #[derive(Iden)]
    pub enum Procurement {
        Table,
        Id,
        VendorId,
        FilamentId,
        QuantityKg,
        CostPerKg,
        TotalAmount,
        OrderDate,
        EtaDelivery,
        FinalDeliveryDate,
        InvoiceNumber,
        TrackingNumber,
        PaymentStatus,
        Status,
        Notes,
        CreatedAt,
    }
}

mod m20240201_000006_create_print_usage_table {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240201_000006_create_print_usage_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(PrintUsage::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(PrintUsage::Id)
                                .big_integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(PrintUsage::OrderId).big_integer().not_null())
                        .col(
                            ColumnDef::new(PrintUsage::FilamentId)
                                .big_integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(PrintUsage::QuantityUsedKg)
                                .decimal_len(10, 3)
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(PrintUsage::CostConsumed)
                                .decimal_len(12, 2)
                                .not_null(),
                        )
                        .col(ColumnDef::new(PrintUsage::PrintDate).date().null())
                        .col(
                            ColumnDef::new(PrintUsage::PrintDurationMins)
                                .integer()
                                .null(),
                        )
                        .col(ColumnDef::new(PrintUsage::PrintStatus).string().not_null())
                        .col(ColumnDef::new(PrintUsage::FailureReason).string().null())
                        .col(ColumnDef::new(PrintUsage::Notes).string().null())
                        .col(
                            ColumnDef::new(PrintUsage::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_print_usage_order_id")
                        .table(PrintUsage::Table)
                        .col(PrintUsage::OrderId)
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_print_usage_filament_id")
                        .table(PrintUsage::Table)
                        .col(PrintUsage::FilamentId)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(PrintUsage::Table).to_owned())
                .await
        }
    }

    #[derive(Iden)]
    pub enum PrintUsage {
        Table,
        Id,
        OrderId,
        FilamentId,
        QuantityUsedKg,
        CostConsumed,
        PrintDate,
        PrintDurationMins,
        PrintStatus,
        FailureReason,
        Notes,
        CreatedAt,
    }
}
