//! End-to-end tests from raw introspection rows to Phinx migration source.

use phinxgen::migrate::{
    EmitterOptions, IntrospectionConfig, Introspector, MigrateResult, MigrationEmitter,
    SchemaSource, TableRows,
};
use phinxgen::mysql::RawRow;
use pretty_assertions::assert_eq;

/// In-memory stand-in for a live server.
struct RecordedDatabase {
    name: String,
    tables: Vec<(String, TableRows)>,
}

impl RecordedDatabase {
    fn rows(&self, table: &str) -> &TableRows {
        &self
            .tables
            .iter()
            .find(|(name, _)| name == table)
            .expect("unknown table")
            .1
    }
}

#[async_trait::async_trait]
impl SchemaSource for RecordedDatabase {
    fn database(&self) -> &str {
        &self.name
    }

    async fn tables(&mut self) -> MigrateResult<Vec<String>> {
        Ok(self.tables.iter().map(|(name, _)| name.clone()).collect())
    }

    async fn columns(&mut self, table: &str) -> MigrateResult<Vec<RawRow>> {
        Ok(self.rows(table).columns.clone())
    }

    async fn indexes(&mut self, table: &str) -> MigrateResult<Vec<RawRow>> {
        Ok(self.rows(table).indexes.clone())
    }

    async fn foreign_keys(&mut self, table: &str) -> MigrateResult<Vec<RawRow>> {
        Ok(self.rows(table).foreign_keys.clone())
    }

    async fn table_status(&mut self, table: &str) -> MigrateResult<Vec<RawRow>> {
        Ok(self.rows(table).status.clone())
    }
}

fn column(
    field: &str,
    ty: &str,
    null: &str,
    key: &str,
    default: Option<&str>,
    extra: &str,
) -> RawRow {
    RawRow::new()
        .with("Field", Some(field))
        .with("Type", Some(ty))
        .with("Null", Some(null))
        .with("Key", Some(key))
        .with("Default", default)
        .with("Extra", Some(extra))
}

fn index(key_name: &str, non_unique: &str, seq: &str, column: &str, index_type: &str) -> RawRow {
    RawRow::new()
        .with("Table", Some("t"))
        .with("Non_unique", Some(non_unique))
        .with("Key_name", Some(key_name))
        .with("Seq_in_index", Some(seq))
        .with("Column_name", Some(column))
        .with("Index_type", Some(index_type))
}

fn status(engine: &str, collation: &str, comment: &str) -> RawRow {
    RawRow::new()
        .with("Name", Some("t"))
        .with("Engine", Some(engine))
        .with("Collation", Some(collation))
        .with("Comment", Some(comment))
}

fn users() -> TableRows {
    TableRows {
        columns: vec![
            column("id", "int(11)", "NO", "PRI", None, "auto_increment"),
            column("email", "varchar(255)", "NO", "UNI", None, ""),
            column("created_at", "timestamp", "YES", "", None, ""),
        ],
        indexes: vec![
            index("PRIMARY", "0", "1", "id", "BTREE"),
            index("email", "0", "1", "email", "BTREE"),
        ],
        foreign_keys: Vec::new(),
        status: vec![status("InnoDB", "utf8mb4_unicode_ci", "")],
    }
}

fn posts() -> TableRows {
    TableRows {
        columns: vec![
            column("id", "bigint(20) unsigned", "NO", "PRI", None, "auto_increment"),
            column("user_id", "int(11)", "YES", "MUL", None, ""),
            column("title", "varchar(200)", "NO", "", Some("Untitled"), ""),
            column("views", "int(10) unsigned", "NO", "", Some("0"), ""),
            column("body", "text", "YES", "", None, ""),
            column(
                "updated_at",
                "timestamp",
                "NO",
                "",
                Some("CURRENT_TIMESTAMP"),
                "DEFAULT_GENERATED on update CURRENT_TIMESTAMP",
            ),
            column("status", "enum('draft','published')", "NO", "", Some("draft"), ""),
            column("location", "point", "YES", "", None, ""),
        ],
        indexes: vec![
            index("PRIMARY", "0", "1", "id", "BTREE"),
            index("user_id", "1", "1", "user_id", "BTREE"),
            index("title_body", "1", "1", "title", "FULLTEXT"),
            index("title_body", "1", "2", "body", "FULLTEXT"),
        ],
        foreign_keys: vec![
            RawRow::new()
                .with("CONSTRAINT_NAME", Some("fk_posts_users"))
                .with("COLUMN_NAME", Some("user_id"))
                .with("REFERENCED_TABLE_NAME", Some("users"))
                .with("REFERENCED_COLUMN_NAME", Some("id"))
                .with("UPDATE_RULE", Some("NO ACTION"))
                .with("DELETE_RULE", Some("SET NULL")),
        ],
        status: vec![status("InnoDB", "utf8mb4_unicode_ci", "Blog posts")],
    }
}

fn blog() -> RecordedDatabase {
    RecordedDatabase {
        name: "blog".to_string(),
        tables: vec![
            ("phinxlog".to_string(), TableRows::default()),
            ("users".to_string(), users()),
            ("posts".to_string(), posts()),
        ],
    }
}

#[tokio::test]
async fn test_full_migration() {
    let mut db = blog();
    let result = Introspector::new(IntrospectionConfig::default())
        .run(&mut db)
        .await
        .unwrap();
    assert_eq!(result.skipped_tables.len(), 1);

    let php = MigrationEmitter::new(EmitterOptions::default()).emit(&result.schema);

    let expected = r#"<?php
// Automatically created phinx migration commands for tables from database blog

use Phinx\Db\Adapter\MysqlAdapter;
use Phinx\Migration\AbstractMigration;

class InitialMigration extends AbstractMigration
{
    public function up()
    {
        $this->execute('SET FOREIGN_KEY_CHECKS=0;');

        // Migration for table users
        $table = $this->table('users', ['id' => false, 'primary_key' => ['id'], 'engine' => 'InnoDB', 'collation' => 'utf8mb4_unicode_ci']);
        $table
            ->addColumn('id', 'integer', ['identity' => true, 'limit' => 11])
            ->addColumn('email', 'string', ['limit' => 255])
            ->addColumn('created_at', 'timestamp', ['null' => true])
            ->addIndex(['email'], ['name' => 'email', 'unique' => true])
            ->create();

        // Migration for table posts
        $table = $this->table('posts', ['id' => false, 'primary_key' => ['id'], 'engine' => 'InnoDB', 'collation' => 'utf8mb4_unicode_ci', 'comment' => 'Blog posts']);
        $table
            ->addColumn('id', 'integer', ['identity' => true, 'limit' => MysqlAdapter::INT_BIG, 'signed' => false])
            ->addColumn('user_id', 'integer', ['null' => true, 'limit' => 11])
            ->addColumn('title', 'string', ['default' => 'Untitled', 'limit' => 200])
            ->addColumn('views', 'integer', ['default' => 0, 'limit' => 10, 'signed' => false])
            ->addColumn('body', 'text', ['null' => true])
            ->addColumn('updated_at', 'timestamp', ['default' => 'CURRENT_TIMESTAMP', 'update' => 'CURRENT_TIMESTAMP'])
            ->addColumn('status', 'enum', ['default' => 'draft', 'values' => ['draft', 'published']])
            ->addColumn('location', '[point]', ['null' => true])
            ->addIndex(['user_id'], ['name' => 'user_id'])
            ->addIndex(['title', 'body'], ['name' => 'title_body', 'type' => 'fulltext'])
            ->addForeignKey(['user_id'], 'users', ['id'], ['constraint' => 'fk_posts_users', 'delete' => 'SET_NULL', 'update' => 'NO_ACTION'])
            ->create();

        $this->execute('SET FOREIGN_KEY_CHECKS=1;');
    }

    public function down()
    {
        $this->execute('SET FOREIGN_KEY_CHECKS=0;');
        $this->table('users')->drop()->save();
        $this->table('posts')->drop()->save();
        $this->execute('SET FOREIGN_KEY_CHECKS=1;');
    }
}
"#;

    assert_eq!(php, expected);
}

#[tokio::test]
async fn test_configured_run() {
    let mut db = blog();
    let result = Introspector::new(
        IntrospectionConfig::new().include_tables(vec!["posts".to_string()]),
    )
    .run(&mut db)
    .await
    .unwrap();

    let options = EmitterOptions::new()
        .class_name("BlogBaseline")
        .indent("\t")
        .exclude_columns(vec!["posts.location".to_string()]);
    let php = MigrationEmitter::new(options).emit(&result.schema);

    assert!(php.contains("class BlogBaseline extends AbstractMigration"));
    assert!(php.contains("\t\t// Migration for table posts\n"));
    assert!(php.contains("\t\t\t->addColumn('body', 'text', ['null' => true])\n"));
    assert!(!php.contains("'location'"));
    assert!(!php.contains("table users"));
    assert!(php.contains("\t\t$this->table('posts')->drop()->save();\n"));
}
