use super::Property;

/// Describes how an entity maps onto a database table.
#[derive(Debug, Clone, PartialEq)]
pub struct EntityType {
    /// Logical name of the entity.
    pub name: String,

    /// Name of the table the entity is stored in.
    pub table: String,

    /// Optional schema (namespace) the table lives in.
    pub schema: Option<String>,

    /// Properties in declaration order.
    pub properties: Vec<Property>,
}

impl EntityType {
    /// Starts describing an entity. The table name defaults to the entity name.
    pub fn builder(name: impl Into<String>) -> EntityTypeBuilder {
        let name = name.into();
        EntityTypeBuilder {
            entity: EntityType {
                table: name.clone(),
                name,
                schema: None,
                properties: vec![],
            },
        }
    }

    pub fn property(&self, name: &str) -> Option<&Property> {
        self.properties.iter().find(|property| property.name == name)
    }

    pub fn primary_key(&self) -> impl Iterator<Item = &Property> + '_ {
        self.properties.iter().filter(|property| property.primary_key)
    }

    /// The key property whose value the store assigns on insert, if any.
    pub fn identity(&self) -> Option<&Property> {
        self.primary_key()
            .find(|property| property.value_generated.on_add())
    }
}

#[derive(Debug)]
pub struct EntityTypeBuilder {
    entity: EntityType,
}

impl EntityTypeBuilder {
    pub fn table(mut self, table: impl Into<String>) -> Self {
        self.entity.table = table.into();
        self
    }

    pub fn schema(mut self, schema: impl Into<String>) -> Self {
        self.entity.schema = Some(schema.into());
        self
    }

    pub fn property(mut self, property: Property) -> Self {
        self.entity.properties.push(property);
        self
    }

    pub fn build(self) -> EntityType {
        self.entity
    }
}
