use crate::commerce::Commerce;
use sb_core::{Cascade, Component, ComponentId, Event, RecordingObserver, ReceiveError, Registry};
use std::sync::Mutex;

/// Records every commerce event with its sender
pub struct Listener {
    id: ComponentId,
    heard: Mutex<Vec<(ComponentId, Commerce)>>,
}

impl Listener {
    pub fn new(id: &str) -> Self {
        Self {
            id: ComponentId::from(id),
            heard: Mutex::new(Vec::new()),
        }
    }

    pub fn heard(&self) -> Vec<(ComponentId, Commerce)> {
        self.heard.lock().unwrap().clone()
    }

    /// Names of heard events, in arrival order
    pub fn names(&self) -> Vec<String> {
        use sb_core::Payload;
        self.heard()
            .iter()
            .map(|(_, payload)| payload.name().to_string())
            .collect()
    }
}

impl Component<Commerce> for Listener {
    fn id(&self) -> &ComponentId {
        &self.id
    }

    fn receive(&self, event: &Event<Commerce>, _: &Cascade<Commerce>) -> Result<(), ReceiveError> {
        self.heard
            .lock()
            .unwrap()
            .push((event.sender().clone(), event.payload().clone()));
        Ok(())
    }
}

pub fn recorded(builder: sb_core::RegistryBuilder<Commerce>) -> (Registry<Commerce>, RecordingObserver) {
    let observer = RecordingObserver::new();
    let registry = builder.observer(observer.clone()).build();
    (registry, observer)
}
