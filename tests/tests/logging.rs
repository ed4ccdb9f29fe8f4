use tests::*;

use pretty_assertions::assert_eq;
use sqlbridge::{
    log::{Event, Logger},
    Expr,
};
use std::sync::{Arc, Mutex};

/// Keeps `oper phase` for every event.
#[derive(Default)]
struct Phases {
    events: Mutex<Vec<String>>,
}

impl Phases {
    fn take(&self) -> Vec<String> {
        std::mem::take(&mut *self.events.lock().unwrap())
    }
}

impl Logger for Phases {
    fn is_enabled(&self) -> bool {
        true
    }

    fn log(&self, event: &Event<'_>) {
        assert_eq!(event.entity, "Blog");
        self.events
            .lock()
            .unwrap()
            .push(format!("{} {}", event.oper, event.phase));
    }
}

#[test]
fn every_phase_is_timed() {
    let phases = Arc::new(Phases::default());
    let db = setup_with(|builder| {
        builder.logger(phases.clone());
    });

    let mut blog = Blog {
        name: "logged".into(),
        ..Blog::default()
    };
    db.insert::<Blog>(&mut blog).unwrap();
    assert_eq!(
        phases.take(),
        [
            "insert compiled",
            "insert executed",
            "insert retrieved identity"
        ]
    );

    db.update::<Blog>(&blog, Some(Expr::col("Id").eq(blog.id)))
        .unwrap();
    assert_eq!(
        phases.take(),
        ["update compiled", "update processed WHERE", "update executed"]
    );

    db.delete_all::<Blog>().unwrap();
    assert_eq!(
        phases.take(),
        [
            "delete_all compiled",
            "delete_all removed WHERE",
            "delete_all executed"
        ]
    );

    db.batch_insert::<Blog>([blog.clone(), blog]).unwrap();
    assert_eq!(
        phases.take(),
        ["batch_insert compiled", "batch_insert executed"]
    );
}
