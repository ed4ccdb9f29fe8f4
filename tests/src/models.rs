use sqlbridge::{fields, Entity, EntityType, Property};

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Blog {
    pub id: i64,
    pub name: String,
    pub url: Option<String>,
    pub rating: i64,
}

fields!(Blog {
    id => "Id",
    name => "Name",
    url => "Url",
    rating => "Rating",
});

impl Entity for Blog {
    fn entity_type() -> EntityType {
        EntityType::builder("Blog")
            .table("blogs")
            .property(Property::new("Id").primary_key().generated_on_add())
            .property(Property::new("Name"))
            .property(Property::new("Url").column("blog_url"))
            .property(Property::new("Rating"))
            .build()
    }
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Post {
    pub id: i64,
    pub blog_id: i64,
    pub title: String,
    pub version: i64,
}

fields!(Post {
    id => "Id",
    blog_id => "BlogId",
    title => "Title",
    version => "Version",
});

impl Entity for Post {
    fn entity_type() -> EntityType {
        EntityType::builder("Post")
            .table("posts")
            .property(Property::new("Id").primary_key().generated_on_add())
            .property(Property::new("BlogId"))
            .property(Property::new("Title"))
            .property(Property::new("Version").concurrency_token())
            .build()
    }
}

/// Keys are assigned by the caller.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Tag {
    pub id: i64,
    pub label: String,
}

fields!(Tag {
    id => "Id",
    label => "Label",
});

impl Entity for Tag {
    fn entity_type() -> EntityType {
        EntityType::builder("Tag")
            .table("tags")
            .property(Property::new("Id").primary_key())
            .property(Property::new("Label"))
            .build()
    }
}
