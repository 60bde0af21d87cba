use tracing::{error, info, instrument};
use uuid::Uuid;
use crate::actor_framework::{Entity, ResourceActor, ResourceClient};
use crate::auth::Passwords;
use crate::clients::{CategoryClient, OrderClient, ProductClient, UserClient};
use crate::config::AdminConfig;
use crate::domain::{Category, Order, Product, Role, User, UserCreate};
use crate::error::AppError;

/// The main application system that orchestrates all actors.
///
/// Responsible for starting up the record stores, wiring the clients
/// together, and handling shutdown.
pub struct StoreSystem {
    pub user_client: UserClient,
    pub category_client: CategoryClient,
    pub product_client: ProductClient,
    pub order_client: OrderClient,
    handles: Vec<tokio::task::JoinHandle<()>>,
}

fn spawn_store<T: Entity<Id = String>>(
    mailbox_size: usize,
    handles: &mut Vec<tokio::task::JoinHandle<()>>,
) -> ResourceClient<T> {
    let (actor, client) = ResourceActor::<T>::new(mailbox_size, || Uuid::new_v4().to_string());
    handles.push(tokio::spawn(actor.run()));
    client
}

impl StoreSystem {
    pub fn new(mailbox_size: usize) -> Self {
        let mut handles = Vec::with_capacity(4);

        let user_client = UserClient::new(spawn_store::<User>(mailbox_size, &mut handles));
        let category_client = CategoryClient::new(spawn_store::<Category>(mailbox_size, &mut handles));
        let product_client = ProductClient::new(spawn_store::<Product>(mailbox_size, &mut handles));
        // Checkout spans users and products, so the order client holds both.
        let order_client = OrderClient::new(
            spawn_store::<Order>(mailbox_size, &mut handles),
            user_client.clone(),
            product_client.clone(),
        );

        info!("Store system started");
        Self { user_client, category_client, product_client, order_client, handles }
    }

    /// Creates the configured administrator unless an account already holds its email.
    #[instrument(skip_all, fields(admin_email = %admin.email))]
    pub async fn bootstrap_admin(&self, admin: &AdminConfig, passwords: &Passwords) -> Result<(), AppError> {
        if self.user_client.find_by_email(&admin.email).await?.is_some() {
            info!("Admin account already present");
            return Ok(());
        }
        let password_hash = passwords.hash(admin.password.clone()).await?;
        let user = self
            .user_client
            .register(UserCreate {
                first_name: admin.first_name.clone(),
                last_name: admin.last_name.clone(),
                email: admin.email.clone(),
                password_hash,
                role: Role::Admin,
                phone_no: String::new(),
                address: String::new(),
                dob: chrono::NaiveDate::default(),
                city: String::new(),
                state: String::new(),
                zipcode: String::new(),
            })
            .await?;
        info!(user_id = %user.id, "Admin account created");
        Ok(())
    }

    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down system...");
        // Stores stop once every client (and so every sender) is gone.
        drop(self.order_client);
        drop(self.user_client);
        drop(self.product_client);
        drop(self.category_client);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Store task failed: {:?}", e);
                return Err(format!("Store task failed: {:?}", e));
            }
        }

        info!("System shutdown complete.");
        Ok(())
    }
}
