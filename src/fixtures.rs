#[cfg(test)]
pub mod test {
    use crate::schema::{Compose, Key, Section};
    use crate::types::TypeDescriptor;
    use crate::value::Value;

    /// Parse a JSON literal into a raw tree.
    pub fn data(json: &str) -> Value {
        serde_json::from_str(json).unwrap()
    }

    /// One slot `asor` backed by section `parma`, whose only key `culex`
    /// reads the `chatty` integer.
    pub fn parma_schema() -> Compose {
        let parma = Section::builder("parma")
            .key("culex", Key::new("chatty", TypeDescriptor::integer()))
            .build();
        Compose::builder().section("asor", parma).build()
    }

    // -- Fixture for multi-section tests ---------------------------------------

    pub fn server_section() -> Section {
        Section::builder("server")
            .key("host", Key::new("host", TypeDescriptor::string()))
            .key("port", Key::new("port", TypeDescriptor::integer()))
            .build()
    }

    pub fn db_section() -> Section {
        Section::builder("db")
            .key("url", Key::new("url", TypeDescriptor::string()))
            .key(
                "pool_size",
                Key::new("pool_size", TypeDescriptor::optional(TypeDescriptor::integer())),
            )
            .key(
                "replicas",
                Key::new("replicas", TypeDescriptor::sequence(TypeDescriptor::string())),
            )
            .build()
    }

    /// Slots `server` (section `server`) and `database` (section `db`).
    pub fn service_schema() -> Compose {
        Compose::builder()
            .section("server", server_section())
            .section("database", db_section())
            .build()
    }

    #[test]
    fn parma_schema_shape() {
        let schema = parma_schema();
        let section = schema.section("asor").unwrap();
        assert_eq!(section.name(), "parma");
        assert_eq!(section.key("culex").unwrap().name(), "chatty");
    }
}
