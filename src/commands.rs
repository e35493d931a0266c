use crate::config::{Config, WriterKind};
use crate::dashboard::Dashboard;
use crate::error::AdminError;
use crate::graphql::{GraphqlClient, GraphqlTransport};
use crate::models::{Booking, Car, RentablePage};
use crate::search::{
    search_listings, GraphqlIndexWriter, IndexWriter, ListingRow, ListingView, SearchCriteria,
    SearchIndex, SortDirection, SyncOutcome, SyncReport, TypesenseClient,
};
use crate::services::bookings::save_export;
use crate::services::{
    AdminApi, BookingFilters, ExportFormat, ManufacturerUpdate, NewCar, NewManufacturer,
    NewRentable, Pagination, RentableUpdate,
};
use crate::session::{Session, SessionStore};
use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};
use url::Url;

/// Admin client for the car-rental platform
#[derive(Debug, Parser)]
#[command(name = "rental-admin", version)]
pub struct Cli {
    /// GraphQL endpoint, overrides RENTAL_GRAPHQL_URL
    #[arg(long, global = true)]
    pub graphql_url: Option<Url>,

    /// Where the admin session is stored, overrides RENTAL_SESSION_FILE
    #[arg(long, global = true)]
    pub session_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Log in and store a two-hour admin session
    Login {
        email: String,
        #[arg(long, env = "RENTAL_ADMIN_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Forget the stored admin session
    Logout,
    #[command(subcommand)]
    Manufacturers(ManufacturerCommand),
    #[command(subcommand)]
    Cars(CarCommand),
    #[command(subcommand)]
    Rentable(RentableCommand),
    #[command(subcommand)]
    Bookings(BookingCommand),
    /// Search rentable listings in the search index
    Search(SearchArgs),
    /// Fleet overview by manufacturer, type and fuel
    Dashboard,
}

#[derive(Debug, Clone, Copy, Args)]
pub struct PageArgs {
    #[arg(long)]
    pub offset: Option<u32>,
    #[arg(long)]
    pub limit: Option<u32>,
}

impl From<PageArgs> for Pagination {
    fn from(args: PageArgs) -> Self {
        Pagination {
            offset: args.offset,
            limit: args.limit,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum ManufacturerCommand {
    List(PageArgs),
    Add {
        name: String,
        #[arg(long)]
        country: String,
    },
    Edit {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        country: Option<String>,
    },
    Delete {
        id: String,
    },
}

#[derive(Debug, Subcommand)]
pub enum CarCommand {
    List(PageArgs),
    Get {
        id: String,
    },
    Add(AddCarArgs),
    /// Bulk-create cars from a spreadsheet
    Import {
        file: PathBuf,
    },
    Delete {
        id: String,
    },
}

#[derive(Debug, Args)]
pub struct AddCarArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long = "type")]
    pub car_type: String,
    #[arg(long)]
    pub seats: u32,
    #[arg(long)]
    pub fuel: String,
    #[arg(long)]
    pub transmission: String,
    #[arg(long)]
    pub description: String,
    #[arg(long)]
    pub quantity: u32,
    #[arg(long)]
    pub manufacturer_id: String,
    #[arg(long)]
    pub primary_image: Option<PathBuf>,
    /// Repeat for up to three images
    #[arg(long = "secondary-image")]
    pub secondary_images: Vec<PathBuf>,
}

#[derive(Debug, Subcommand)]
pub enum RentableCommand {
    /// List rentable cars; with search filters, matching listings replace the page
    List {
        #[command(flatten)]
        page: PageArgs,
        #[command(flatten)]
        search: SearchArgs,
    },
    Add {
        car_id: String,
        #[arg(long)]
        price: f64,
        #[arg(long)]
        quantity: u32,
    },
    Update {
        id: String,
        #[arg(long)]
        price: f64,
        #[arg(long)]
        quantity: u32,
    },
    Delete {
        id: String,
    },
    /// Push the current rentable list into the search index
    Sync(PageArgs),
}

#[derive(Debug, Subcommand)]
pub enum BookingCommand {
    List {
        #[arg(long)]
        status: Option<String>,
        #[arg(long)]
        from: Option<String>,
        #[arg(long)]
        to: Option<String>,
    },
    Page(PageArgs),
    /// Mark a booking as delivered
    Deliver {
        id: String,
    },
    Export {
        #[arg(value_enum)]
        format: ExportFormat,
        #[arg(long, default_value = ".")]
        out: PathBuf,
    },
}

#[derive(Debug, Clone, Default, Args)]
pub struct SearchArgs {
    /// Free-text query
    #[arg(long = "query", short = 'q', default_value = "")]
    pub query: String,
    #[arg(long = "car-type")]
    pub car_type: Option<String>,
    #[arg(long)]
    pub transmission: Option<String>,
    #[arg(long)]
    pub fuel: Option<String>,
    #[arg(long)]
    pub seats: Option<String>,
    #[arg(long)]
    pub min_price: Option<f64>,
    #[arg(long)]
    pub max_price: Option<f64>,
    #[arg(long, value_enum, default_value_t = SortDirection::Asc)]
    pub sort: SortDirection,
}

impl SearchArgs {
    fn is_active(&self) -> bool {
        !self.query.trim().is_empty()
            || self.car_type.is_some()
            || self.transmission.is_some()
            || self.fuel.is_some()
            || self.seats.is_some()
            || self.min_price.is_some()
            || self.max_price.is_some()
    }
}

impl From<SearchArgs> for SearchCriteria {
    fn from(args: SearchArgs) -> Self {
        SearchCriteria {
            query: args.query,
            car_type: args.car_type,
            transmission_type: args.transmission,
            fuel_type: args.fuel,
            number_of_seats: args.seats,
            min_price: args.min_price,
            max_price: args.max_price,
            sort: args.sort,
        }
    }
}

/// Wired-up clients for one CLI invocation
pub struct App {
    api: AdminApi,
    index: Arc<dyn SearchIndex>,
    writer: Arc<dyn IndexWriter>,
    sessions: SessionStore,
}

impl App {
    pub fn new(config: Config) -> Result<Self> {
        let transport: Arc<dyn GraphqlTransport> = Arc::new(
            GraphqlClient::new(config.graphql_url.clone(), config.http_timeout)
                .context("Failed to create GraphQL client")?,
        );
        let index = Arc::new(
            TypesenseClient::new(
                config.typesense_url.clone(),
                config.typesense_api_key.clone(),
                config.typesense_collection.clone(),
            )
            .context("Failed to create search client")?,
        );
        let writer: Arc<dyn IndexWriter> = match config.index_writer {
            WriterKind::Graphql => Arc::new(GraphqlIndexWriter::new(transport.clone())),
            WriterKind::Typesense => index.clone(),
        };

        Ok(Self::with_clients(
            transport,
            index,
            writer,
            SessionStore::new(config.session_file),
        ))
    }

    pub fn with_clients(
        transport: Arc<dyn GraphqlTransport>,
        index: Arc<dyn SearchIndex>,
        writer: Arc<dyn IndexWriter>,
        sessions: SessionStore,
    ) -> Self {
        Self {
            api: AdminApi::new(transport),
            index,
            writer,
            sessions,
        }
    }

    pub async fn run(&self, command: Command) -> Result<()> {
        match command {
            Command::Login { email, password } => self.login(&email, &password).await,
            Command::Logout => {
                self.sessions.clear().await?;
                info!("👋 Logged out");
                Ok(())
            }
            Command::Manufacturers(cmd) => self.manufacturers(cmd).await,
            Command::Cars(cmd) => self.cars(cmd).await,
            Command::Rentable(cmd) => self.rentable(cmd).await,
            Command::Bookings(cmd) => self.bookings(cmd).await,
            Command::Search(args) => self.search(args).await,
            Command::Dashboard => self.dashboard().await,
        }
    }

    async fn session(&self) -> Result<Session> {
        self.sessions
            .load()
            .await
            .context("An admin session is required for this command")
    }

    async fn login(&self, email: &str, password: &str) -> Result<()> {
        let session = self.api.login(email, password).await.context("Login failed")?;
        self.sessions.save(&session).await?;
        info!("✅ Logged in, session valid until {}", session.expires_at);
        Ok(())
    }

    async fn manufacturers(&self, cmd: ManufacturerCommand) -> Result<()> {
        match cmd {
            ManufacturerCommand::List(page) => {
                let page = self.api.list_manufacturers(page.into()).await?;
                for (i, m) in page.manufacturers.iter().enumerate() {
                    println!(
                        "{}. {} ({})",
                        i + 1,
                        m.name,
                        m.country.as_deref().unwrap_or("-")
                    );
                    println!("   ID: {}", m.id.as_deref().unwrap_or("-"));
                }
                println!("Total: {}", page.total_count);
            }
            ManufacturerCommand::Add { name, country } => {
                let created = self
                    .api
                    .add_manufacturer(&NewManufacturer { name, country })
                    .await?;
                println!("Manufacturer added successfully: {}", created.name);
            }
            ManufacturerCommand::Edit { id, name, country } => {
                let updated = self
                    .api
                    .edit_manufacturer(&ManufacturerUpdate { id, name, country })
                    .await?;
                println!("Manufacturer updated: {}", updated.name);
            }
            ManufacturerCommand::Delete { id } => {
                self.api.delete_manufacturer(&id).await?;
                println!("Manufacturer {id} deleted");
            }
        }
        Ok(())
    }

    async fn cars(&self, cmd: CarCommand) -> Result<()> {
        match cmd {
            CarCommand::List(page) => {
                let page = self.api.list_cars(page.into()).await?;
                for (i, car) in page.cars.iter().enumerate() {
                    print_car(i + 1, car);
                }
                println!(
                    "Showing {} of {}{}",
                    page.cars.len(),
                    page.total,
                    if page.has_more { " (more available)" } else { "" }
                );
            }
            CarCommand::Get { id } => {
                let car = self.api.get_car(&id).await?;
                print_car(1, &car);
                if !car.description.is_empty() {
                    println!("   {}", car.description);
                }
            }
            CarCommand::Add(args) => {
                let input = NewCar {
                    name: args.name,
                    car_type: args.car_type,
                    number_of_seats: args.seats,
                    fuel_type: args.fuel,
                    transmission_type: args.transmission,
                    description: args.description,
                    quantity: args.quantity,
                    manufacturer_id: args.manufacturer_id,
                    primary_image: args.primary_image,
                    secondary_images: args.secondary_images,
                };
                let car = self.api.add_car(&input).await?;
                println!("Car has been added successfully: {}", car.name);
            }
            CarCommand::Import { file } => {
                let cars = self.api.import_cars(&file).await?;
                println!("Imported {} cars", cars.len());
            }
            CarCommand::Delete { id } => {
                self.api.delete_car(&id).await?;
                println!("Car {id} deleted");
            }
        }
        Ok(())
    }

    async fn rentable(&self, cmd: RentableCommand) -> Result<()> {
        match cmd {
            RentableCommand::List { page, search } => {
                let view = self.listing_view(page.into(), search).await?;
                if view.is_searching() {
                    info!("🔎 Showing search results");
                }
                print_rows(&view.rows());
            }
            RentableCommand::Add {
                car_id,
                price,
                quantity,
            } => {
                let input = NewRentable {
                    car_id,
                    price_per_day: price,
                    available_quantity: quantity,
                };
                let created = self.api.add_rentable(&input).await?;
                println!("Car added to rentable list: {}", created.id);
                self.refresh(Pagination::default()).await?;
            }
            RentableCommand::Update { id, price, quantity } => {
                let update = RentableUpdate {
                    price_per_day: price,
                    available_quantity: quantity,
                };
                self.api.update_rentable(&id, &update).await?;
                println!("Car updated successfully.");
                self.refresh(Pagination::default()).await?;
            }
            RentableCommand::Delete { id } => {
                self.api
                    .delete_rentable(&id, Some(self.index.as_ref()))
                    .await?;
                println!("The car has been deleted.");
                self.refresh(Pagination::default()).await?;
            }
            RentableCommand::Sync(page) => {
                let (_, report) = self
                    .api
                    .fetch_and_sync(page.into(), self.writer.as_ref())
                    .await
                    .context("Error loading rentable cars")?;
                report_sync(&report);
                let upserted = report.into_result()?;
                println!("Synced {upserted} listing(s)");
            }
        }
        Ok(())
    }

    /// Browse page, replaced by search hits when a search is active and finds any
    async fn listing_view(&self, page: Pagination, search: SearchArgs) -> Result<ListingView> {
        let browse = self.refresh(page).await?;
        let hits = if search.is_active() {
            match search_listings(self.index.as_ref(), &search.into()).await {
                Ok(hits) => Some(hits),
                Err(AdminError::SearchFailed) => {
                    warn!("{}, showing the rentable list instead", AdminError::SearchFailed);
                    None
                }
                Err(e) => return Err(e.into()),
            }
        } else {
            None
        };
        Ok(ListingView::select(browse, hits))
    }

    /// Re-fetch the rentable list, syncing it into the search index
    async fn refresh(&self, page: Pagination) -> Result<RentablePage> {
        let (rentable, report) = self
            .api
            .fetch_and_sync(page, self.writer.as_ref())
            .await
            .context("Error loading rentable cars")?;
        report_sync(&report);
        Ok(rentable)
    }

    async fn bookings(&self, cmd: BookingCommand) -> Result<()> {
        let session = self.session().await?;
        match cmd {
            BookingCommand::List { status, from, to } => {
                let filters = BookingFilters {
                    status,
                    start_date: from,
                    end_date: to,
                };
                let bookings = self
                    .api
                    .list_bookings(&session, &filters)
                    .await
                    .context("Failed to fetch bookings")?;
                if bookings.is_empty() {
                    println!("No Bookings Found");
                }
                for (i, booking) in bookings.iter().enumerate() {
                    print_booking(i + 1, booking);
                }
            }
            BookingCommand::Page(page) => {
                let page = self
                    .api
                    .bookings_page(&session, page.into())
                    .await
                    .context("Failed to fetch bookings")?;
                for (i, booking) in page.bookings.iter().enumerate() {
                    print_booking(i + 1, booking);
                }
                println!("Total: {}", page.total_count);
            }
            BookingCommand::Deliver { id } => {
                let booking = self.api.mark_delivered(&session, &id).await?;
                println!("Booking {} is now {}", booking.id, booking.status);
            }
            BookingCommand::Export { format, out } => {
                let file = self.api.export_bookings(&session, format).await?;
                let path = save_export(&file, &out).await?;
                info!("💾 Saved bookings export to {}", path.display());
            }
        }
        Ok(())
    }

    async fn search(&self, args: SearchArgs) -> Result<()> {
        let hits = search_listings(self.index.as_ref(), &args.into()).await?;
        if hits.is_empty() {
            println!("No cars found");
        }
        let rows: Vec<ListingRow> = hits.iter().map(ListingRow::from).collect();
        print_rows(&rows);
        Ok(())
    }

    async fn dashboard(&self) -> Result<()> {
        let manufacturers = self.api.list_manufacturers(Pagination::default()).await?;
        let cars = self.api.list_cars(Pagination::default()).await?;

        let dashboard = Dashboard::build(&manufacturers.manufacturers, &cars.cars);
        for card in &dashboard.cards {
            println!("{}: {}", card.title, card.total);
            for (name, count) in &card.buckets {
                println!("   {name}: {count}");
            }
        }
        Ok(())
    }
}

fn report_sync(report: &SyncReport) {
    match report.failure() {
        Some(SyncOutcome::Failed { name, reason, .. }) => warn!(
            "Search index sync stopped at {} ({}); {} record(s) not attempted",
            name, reason, report.skipped
        ),
        _ => info!(
            "🔄 Synced {} of {} listing(s) to the search index",
            report.upserted(),
            report.attempted()
        ),
    }
}

fn print_car(position: usize, car: &Car) {
    let manufacturer = car
        .manufacturer
        .as_ref()
        .map(|m| m.name.as_str())
        .unwrap_or("-");
    println!("{}. {} {} ({})", position, manufacturer, car.name, car.car_type);
    println!(
        "   {} seats, {}, {}, quantity {}",
        car.number_of_seats, car.transmission_type, car.fuel_type, car.quantity
    );
    println!("   ID: {}", car.id.as_deref().unwrap_or("-"));
}

fn print_rows(rows: &[ListingRow]) {
    for (i, row) in rows.iter().enumerate() {
        println!("{}. {} {} (${:.2}/day)", i + 1, row.manufacturer, row.name, row.price_per_day);
        println!("   Available: {}", row.available_quantity);
        if let Some(url) = &row.image_url {
            println!("   Image: {}", url);
        }
        println!("   ID: {}", row.id);
    }
}

fn print_booking(position: usize, booking: &Booking) {
    let car = booking
        .rentable
        .as_ref()
        .map(|r| format!("{} {}", r.car.manufacturer.name, r.car.name))
        .unwrap_or_else(|| "-".to_string());
    println!(
        "{}. {} [{}] {} -> {}",
        position,
        car,
        booking.status().label(),
        booking.pick_up_date,
        booking.drop_off_date
    );
    println!("   Total: ${:.2}", booking.total_price);
    if let Some(phone) = &booking.phone_number {
        println!("   Phone: {}", phone);
    }
    println!("   ID: {}", booking.id);
}
