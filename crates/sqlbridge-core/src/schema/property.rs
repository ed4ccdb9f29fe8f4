/// A mapped property of an entity.
#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    /// Logical name, as seen by application code.
    pub name: String,

    /// Physical column name.
    pub column: String,

    /// True if the property is part of the primary key.
    pub primary_key: bool,

    /// True if the property takes part in optimistic concurrency checks.
    pub concurrency_token: bool,

    /// When the store assigns the property's value.
    pub value_generated: ValueGenerated,

    /// Whether the value is sent when the row is inserted.
    pub before_save: SaveBehavior,

    /// Whether the value is sent when the row is updated.
    pub after_save: SaveBehavior,
}

/// When the database assigns a value to a column.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum ValueGenerated {
    #[default]
    Never,
    OnAdd,
    OnUpdate,
    OnAddOrUpdate,
}

/// Whether a property value is ever included in a statement.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum SaveBehavior {
    #[default]
    Save,
    Ignore,
    Throw,
}

impl ValueGenerated {
    pub fn on_add(self) -> bool {
        matches!(self, ValueGenerated::OnAdd | ValueGenerated::OnAddOrUpdate)
    }

    pub fn on_update(self) -> bool {
        matches!(
            self,
            ValueGenerated::OnUpdate | ValueGenerated::OnAddOrUpdate
        )
    }
}

impl Property {
    /// A plain property whose column name equals its logical name.
    pub fn new(name: impl Into<String>) -> Property {
        let name = name.into();
        Property {
            column: name.clone(),
            name,
            primary_key: false,
            concurrency_token: false,
            value_generated: ValueGenerated::Never,
            before_save: SaveBehavior::Save,
            after_save: SaveBehavior::Save,
        }
    }

    pub fn column(mut self, column: impl Into<String>) -> Self {
        self.column = column.into();
        self
    }

    /// Key values cannot change once a row exists.
    pub fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self.after_save = SaveBehavior::Throw;
        self
    }

    pub fn concurrency_token(mut self) -> Self {
        self.concurrency_token = true;
        self
    }

    /// Identity or sequence columns.
    pub fn generated_on_add(mut self) -> Self {
        self.value_generated = ValueGenerated::OnAdd;
        self
    }

    pub fn generated_on_update(mut self) -> Self {
        self.value_generated = ValueGenerated::OnUpdate;
        self.after_save = SaveBehavior::Ignore;
        self
    }

    /// Row versions and computed columns.
    pub fn generated_on_add_or_update(mut self) -> Self {
        self.value_generated = ValueGenerated::OnAddOrUpdate;
        self.before_save = SaveBehavior::Ignore;
        self.after_save = SaveBehavior::Ignore;
        self
    }

    pub fn before_save(mut self, behavior: SaveBehavior) -> Self {
        self.before_save = behavior;
        self
    }

    pub fn after_save(mut self, behavior: SaveBehavior) -> Self {
        self.after_save = behavior;
        self
    }

    /// True when the column name was configured to differ from the property name.
    pub fn is_renamed(&self) -> bool {
        self.column != self.name
    }
}
