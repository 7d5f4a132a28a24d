use crate::config::Config;
use crate::db::initialize::open_db;
use crate::db::queries::load_courses;
use crate::errors::AppResult;
use crate::utils::table::{Column, Table};

pub fn handle(cfg: &Config) -> AppResult<()> {
    let pool = open_db(&cfg.database)?;

    let mut table = Table::new(vec![
        Column::left("ID"),
        Column::left("Course"),
        Column::right("Classes"),
    ]);
    for c in load_courses(&pool)? {
        let classes = c
            .total_classes
            .map(|n| n.to_string())
            .unwrap_or_else(|| "-".to_string());
        table.add_row(vec![c.id.into(), c.name.into(), classes.into()]);
    }

    print!("{}", table.render());
    Ok(())
}
