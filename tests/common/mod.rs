#![allow(dead_code)]

pub mod temp_files {
    use std::io::Write;
    use tempfile::NamedTempFile;

    /// Write `content` to a temporary file with extension `ext`
    ///
    /// The file is removed when the returned handle is dropped.
    pub fn create_temp_config(content: &str, ext: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new()
            .prefix("riouter_test_")
            .suffix(&format!(".{ext}"))
            .tempfile()
            .unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    /// Temporary YAML config file
    pub fn create_temp_yaml(content: &str) -> NamedTempFile {
        create_temp_config(content, "yaml")
    }

    /// Temporary JSON config file
    pub fn create_temp_json(content: &str) -> NamedTempFile {
        create_temp_config(content, "json")
    }
}

pub mod recorders {
    use riouter::{Listener, RouteEvent, RouterEvent};
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Listener that records the path of every router `Push`
    pub fn router_push_recorder() -> (Rc<RefCell<Vec<String>>>, Listener<RouterEvent>) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let s = Rc::clone(&seen);
        let listener: Listener<RouterEvent> = Rc::new(move |event: &RouterEvent| {
            if let RouterEvent::Push(push) = event {
                s.borrow_mut().push(push.path.clone());
            }
        });
        (seen, listener)
    }

    /// Listener that records the path of every route `Push`
    pub fn route_push_recorder() -> (Rc<RefCell<Vec<String>>>, Listener<RouteEvent>) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let s = Rc::clone(&seen);
        let listener: Listener<RouteEvent> = Rc::new(move |event: &RouteEvent| {
            let RouteEvent::Push(push) = event;
            s.borrow_mut().push(push.path.clone());
        });
        (seen, listener)
    }
}
