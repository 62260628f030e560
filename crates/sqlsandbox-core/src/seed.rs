//! Sample schema and randomized sample rows, built once at boot.

use crate::error::{Result, SandboxError};
use crate::store::SandboxStore;
use log::info;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rusqlite::{params, Connection};
use sqlsandbox_configs::SeedSettings;
use std::time::Instant;

const SCHEMA_DDL: &str = r#"
    -- Users table
    CREATE TABLE users (
      id INTEGER PRIMARY KEY,
      name TEXT NOT NULL,
      email TEXT UNIQUE NOT NULL,
      age INTEGER,
      created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
    );

    -- Categories table
    CREATE TABLE categories (
      id INTEGER PRIMARY KEY,
      name TEXT NOT NULL
    );

    -- Products table
    CREATE TABLE products (
      id INTEGER PRIMARY KEY,
      name TEXT NOT NULL,
      description TEXT,
      price REAL NOT NULL,
      category_id INTEGER,
      created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
      FOREIGN KEY (category_id) REFERENCES categories(id)
    );

    -- Orders table
    CREATE TABLE orders (
      id INTEGER PRIMARY KEY,
      user_id INTEGER NOT NULL,
      order_date TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
      status TEXT DEFAULT 'pending',
      total_amount REAL NOT NULL,
      FOREIGN KEY (user_id) REFERENCES users(id)
    );

    -- Order items table
    CREATE TABLE order_items (
      id INTEGER PRIMARY KEY,
      order_id INTEGER NOT NULL,
      product_id INTEGER NOT NULL,
      quantity INTEGER NOT NULL,
      price REAL NOT NULL,
      FOREIGN KEY (order_id) REFERENCES orders(id),
      FOREIGN KEY (product_id) REFERENCES products(id)
    );

    -- Departments table
    CREATE TABLE departments (
      id INTEGER PRIMARY KEY,
      name TEXT NOT NULL,
      location TEXT
    );

    -- Employees table
    CREATE TABLE employees (
      id INTEGER PRIMARY KEY,
      name TEXT NOT NULL,
      email TEXT UNIQUE NOT NULL,
      department_id INTEGER,
      salary REAL,
      hire_date TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
      FOREIGN KEY (department_id) REFERENCES departments(id)
    );
"#;

/// Tables created by [`seed_database`], in creation order.
pub const SEEDED_TABLES: [&str; 7] = [
    "users",
    "categories",
    "products",
    "orders",
    "order_items",
    "departments",
    "employees",
];

const CATEGORIES: [&str; 5] = [
    "Electronics",
    "Clothing",
    "Books",
    "Home & Kitchen",
    "Sports & Outdoors",
];

const DEPARTMENTS: [(&str, &str); 5] = [
    ("Engineering", "Building A"),
    ("Marketing", "Building B"),
    ("Sales", "Building C"),
    ("Human Resources", "Building A"),
    ("Customer Support", "Building D"),
];

const ORDER_STATUSES: [&str; 5] = ["pending", "processing", "shipped", "delivered", "cancelled"];

/// Row counts observed after seeding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedSummary {
    pub users: i64,
    pub products: i64,
    pub orders: i64,
    pub order_items: i64,
    pub employees: i64,
}

/// Create the sample schema and fill it with randomized rows.
///
/// Runs in a single transaction; a failure leaves the store empty.
pub fn seed_database(store: &SandboxStore, settings: &SeedSettings) -> Result<SeedSummary> {
    if settings.orders > 0 && (settings.users == 0 || settings.products == 0) {
        return Err(SandboxError::Seed(
            "orders need at least one user and one product to reference".to_string(),
        ));
    }
    if settings.max_items_per_order == 0 {
        return Err(SandboxError::Seed("max_items_per_order must be at least 1".to_string()));
    }

    let start = Instant::now();
    info!("Initializing database with tables and sample data...");

    let mut rng = match settings.rng_seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let summary = store.with_connection(|conn| -> rusqlite::Result<SeedSummary> {
        let tx = conn.unchecked_transaction()?;
        tx.execute_batch(SCHEMA_DDL)?;
        insert_sample_rows(&tx, settings, &mut rng)?;
        tx.commit()?;
        count_rows(conn)
    });
    let summary = summary.map_err(SandboxError::seed)?;

    info!(
        "Initialized with: {} users, {} products, {} orders, {} employees ({:.2}ms)",
        summary.users,
        summary.products,
        summary.orders,
        summary.employees,
        start.elapsed().as_secs_f64() * 1000.0
    );

    Ok(summary)
}

fn insert_sample_rows<R: Rng>(conn: &Connection, settings: &SeedSettings, rng: &mut R) -> rusqlite::Result<()> {
    let mut insert_category = conn.prepare("INSERT INTO categories (name) VALUES (?1)")?;
    for name in CATEGORIES {
        insert_category.execute(params![name])?;
    }

    let mut insert_user = conn.prepare("INSERT INTO users (name, email, age) VALUES (?1, ?2, ?3)")?;
    for i in 1..=settings.users {
        let age: i64 = rng.random_range(18..=67);
        insert_user.execute(params![format!("User {}", i), format!("user{}@example.com", i), age])?;
    }

    let mut insert_product = conn.prepare(
        "INSERT INTO products (name, description, price, category_id) VALUES (?1, ?2, ?3, ?4)",
    )?;
    for i in 1..=settings.products {
        let category_id = rng.random_range(1..=CATEGORIES.len() as i64);
        let price = money(rng.random_range(10.0..1000.0));
        insert_product.execute(params![
            format!("Product {}", i),
            format!("Description for product {}", i),
            price,
            category_id
        ])?;
    }

    let mut insert_department = conn.prepare("INSERT INTO departments (name, location) VALUES (?1, ?2)")?;
    for (name, location) in DEPARTMENTS {
        insert_department.execute(params![name, location])?;
    }

    let mut insert_employee = conn.prepare(
        "INSERT INTO employees (name, email, department_id, salary) VALUES (?1, ?2, ?3, ?4)",
    )?;
    for i in 1..=settings.employees {
        let department_id = rng.random_range(1..=DEPARTMENTS.len() as i64);
        let salary = money(rng.random_range(30000.0..100000.0));
        insert_employee.execute(params![
            format!("Employee {}", i),
            format!("employee{}@example.com", i),
            department_id,
            salary
        ])?;
    }

    let mut insert_order =
        conn.prepare("INSERT INTO orders (user_id, status, total_amount) VALUES (?1, ?2, ?3)")?;
    let mut insert_order_item = conn.prepare(
        "INSERT INTO order_items (order_id, product_id, quantity, price) VALUES (?1, ?2, ?3, ?4)",
    )?;
    for _ in 0..settings.orders {
        let user_id = rng.random_range(1..=settings.users as i64);
        let status = ORDER_STATUSES[rng.random_range(0..ORDER_STATUSES.len())];
        let total_amount = money(rng.random_range(50.0..500.0));
        insert_order.execute(params![user_id, status, total_amount])?;
        let order_id = conn.last_insert_rowid();

        let item_count = rng.random_range(1..=settings.max_items_per_order);
        for _ in 0..item_count {
            let product_id = rng.random_range(1..=settings.products as i64);
            let quantity: i64 = rng.random_range(1..=5);
            let price = money(rng.random_range(10.0..200.0));
            insert_order_item.execute(params![order_id, product_id, quantity, price])?;
        }
    }

    Ok(())
}

fn count_rows(conn: &Connection) -> rusqlite::Result<SeedSummary> {
    let count = |table: &str| -> rusqlite::Result<i64> {
        conn.query_row(&format!("SELECT COUNT(*) AS count FROM {}", table), [], |row| row.get(0))
    };

    Ok(SeedSummary {
        users: count("users")?,
        products: count("products")?,
        orders: count("orders")?,
        order_items: count("order_items")?,
        employees: count("employees")?,
    })
}

/// Round to whole cents.
fn money(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}
