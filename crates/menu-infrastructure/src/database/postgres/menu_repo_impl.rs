// ============================================================================
// Menu Infrastructure - PostgreSQL Menu Repository
// File: crates/menu-infrastructure/src/database/postgres/menu_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;
use tracing::{info, error};
use chrono::{DateTime, Utc};

use menu_core::domain::Menu;
use menu_core::error::DomainError;
use menu_core::repositories::MenuRepository;

pub struct PgMenuRepository {
    pool: PgPool,
}

impl PgMenuRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// Internal row type for SQLx mapping
#[derive(Debug, FromRow)]
struct MenuRow {
    pub id: Uuid,
    pub name: String,
    pub parent_id: Option<Uuid>,
    pub depth: i32,
    pub menu_order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<MenuRow> for Menu {
    fn from(row: MenuRow) -> Self {
        Menu {
            id: row.id,
            name: row.name,
            parent_id: row.parent_id,
            depth: row.depth,
            order: row.menu_order,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

fn db_error(context: &'static str) -> impl Fn(sqlx::Error) -> DomainError {
    move |e: sqlx::Error| {
        error!("Database error {}: {}", context, e);
        DomainError::DatabaseError(e.to_string())
    }
}

#[async_trait]
impl MenuRepository for PgMenuRepository {
    async fn ping(&self) -> Result<(), DomainError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(db_error("pinging database"))?;
        Ok(())
    }

    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Menu>, DomainError> {
        let row: Option<MenuRow> = sqlx::query_as(
            r#"
            SELECT id, name, parent_id, depth, menu_order, created_at, updated_at
            FROM menus
            WHERE id = $1
            "#
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("finding menu by id"))?;

        Ok(row.map(|r| r.into()))
    }

    async fn find_all(&self) -> Result<Vec<Menu>, DomainError> {
        let rows: Vec<MenuRow> = sqlx::query_as(
            r#"
            SELECT id, name, parent_id, depth, menu_order, created_at, updated_at
            FROM menus
            ORDER BY depth ASC, menu_order ASC, created_at ASC
            "#
        )
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("listing menus"))?;

        Ok(rows.into_iter().map(Menu::from).collect())
    }

    async fn find_children(&self, parent_id: Option<Uuid>) -> Result<Vec<Menu>, DomainError> {
        let rows: Vec<MenuRow> = sqlx::query_as(
            r#"
            SELECT id, name, parent_id, depth, menu_order, created_at, updated_at
            FROM menus
            WHERE parent_id IS NOT DISTINCT FROM $1
            ORDER BY menu_order ASC, created_at ASC
            "#
        )
        .bind(parent_id)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("finding child menus"))?;

        Ok(rows.into_iter().map(Menu::from).collect())
    }

    async fn count_children(&self, parent_id: Option<Uuid>) -> Result<i64, DomainError> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM menus WHERE parent_id IS NOT DISTINCT FROM $1"
        )
        .bind(parent_id)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error("counting child menus"))
    }

    async fn create(&self, menu: &Menu) -> Result<Menu, DomainError> {
        info!("Creating menu: {}", menu.name);

        let row: MenuRow = sqlx::query_as(
            r#"
            INSERT INTO menus (id, name, parent_id, depth, menu_order, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, name, parent_id, depth, menu_order, created_at, updated_at
            "#
        )
        .bind(menu.id)
        .bind(&menu.name)
        .bind(menu.parent_id)
        .bind(menu.depth)
        .bind(menu.order)
        .bind(menu.created_at)
        .bind(menu.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error creating menu: {}", e);
            let msg = e.to_string();
            match (menu.parent_id, msg.contains("foreign key")) {
                (Some(parent_id), true) => DomainError::ParentNotFound(parent_id),
                _ => DomainError::DatabaseError(msg),
            }
        })?;

        info!("Menu created successfully: {}", row.id);
        Ok(row.into())
    }

    async fn save_all(&self, menus: &[Menu]) -> Result<Vec<Menu>, DomainError> {
        let mut tx = self.pool.begin().await.map_err(db_error("starting transaction"))?;
        let mut saved = Vec::with_capacity(menus.len());

        for menu in menus {
            let row: Option<MenuRow> = sqlx::query_as(
                r#"
                UPDATE menus
                SET
                    name = $2,
                    parent_id = $3,
                    depth = $4,
                    menu_order = $5,
                    updated_at = $6
                WHERE id = $1
                RETURNING id, name, parent_id, depth, menu_order, created_at, updated_at
                "#
            )
            .bind(menu.id)
            .bind(&menu.name)
            .bind(menu.parent_id)
            .bind(menu.depth)
            .bind(menu.order)
            .bind(menu.updated_at)
            .fetch_optional(&mut *tx)
            .await
            .map_err(db_error("updating menu"))?;

            match row {
                Some(row) => saved.push(row.into()),
                // Dropping `tx` rolls the batch back.
                None => return Err(DomainError::MenuNotFound(menu.id)),
            }
        }

        tx.commit().await.map_err(db_error("committing menu updates"))?;
        Ok(saved)
    }

    async fn delete_all(&self, ids: &[Uuid], reordered: &[Menu]) -> Result<u64, DomainError> {
        let mut tx = self.pool.begin().await.map_err(db_error("starting transaction"))?;

        let deleted = sqlx::query("DELETE FROM menus WHERE id = ANY($1)")
            .bind(ids)
            .execute(&mut *tx)
            .await
            .map_err(db_error("deleting menus"))?
            .rows_affected();

        for menu in reordered {
            sqlx::query("UPDATE menus SET menu_order = $2, updated_at = $3 WHERE id = $1")
                .bind(menu.id)
                .bind(menu.order)
                .bind(menu.updated_at)
                .execute(&mut *tx)
                .await
                .map_err(db_error("renumbering sibling menus"))?;
        }

        tx.commit().await.map_err(db_error("committing menu delete"))?;

        info!("Deleted {} menu row(s), renumbered {}", deleted, reordered.len());
        Ok(deleted)
    }
}
