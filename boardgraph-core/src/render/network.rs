//! Renderable network with double-click subscriptions

use tracing::{debug, warn};

use super::NetworkOptions;
use crate::graph::{Graph, NodeId};
use crate::navigate::{Navigator, Opener};

/// What a double-click subscription does with the activated node
enum Handler {
    Callback(Box<dyn FnMut(Option<NodeId>)>),
    Navigate {
        navigator: Navigator,
        opener: Box<dyn Opener>,
    },
}

impl Handler {
    fn call(&mut self, node: Option<NodeId>) {
        match self {
            Handler::Callback(callback) => callback(node),
            Handler::Navigate { navigator, opener } => {
                let node = node.map(|id| id.to_string());
                if let Err(e) = navigator.open(node.as_deref(), opener.as_ref()) {
                    warn!(error = %e, "Double-click navigation failed");
                }
            }
        }
    }
}

/// Token returned when subscribing to double-clicks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Subscription(u64);

/// A graph paired with its styling and event handlers
///
/// Handlers live exactly as long as the network; dropping it drops them.
pub struct Network {
    graph: Graph,
    options: NetworkOptions,
    handlers: Vec<(Subscription, Handler)>,
    next_subscription: u64,
}

impl std::fmt::Debug for Network {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Network")
            .field("nodes", &self.graph.nodes.len())
            .field("edges", &self.graph.edges.len())
            .field("handlers", &self.handlers.len())
            .finish_non_exhaustive()
    }
}

impl Network {
    pub fn new(graph: Graph, options: NetworkOptions) -> Self {
        Self {
            graph,
            options,
            handlers: Vec::new(),
            next_subscription: 0,
        }
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn options(&self) -> &NetworkOptions {
        &self.options
    }

    fn subscribe(&mut self, handler: Handler) -> Subscription {
        let subscription = Subscription(self.next_subscription);
        self.next_subscription += 1;
        self.handlers.push((subscription, handler));
        subscription
    }

    /// Register a handler for node activation
    ///
    /// The handler receives the activated node, or `None` when the
    /// double-click landed on empty canvas.
    pub fn on_double_click<F>(&mut self, handler: F) -> Subscription
    where
        F: FnMut(Option<NodeId>) + 'static,
    {
        self.subscribe(Handler::Callback(Box::new(handler)))
    }

    /// Open the activated node's issue page through `opener`
    ///
    /// While this subscription is live the rendered page carries the same
    /// behaviour, opening the issue in a new browser tab.
    pub fn navigate_on_double_click(
        &mut self,
        navigator: Navigator,
        opener: impl Opener + 'static,
    ) -> Subscription {
        self.subscribe(Handler::Navigate {
            navigator,
            opener: Box::new(opener),
        })
    }

    /// Remove a handler. Returns false if it was already gone.
    pub fn unsubscribe(&mut self, subscription: Subscription) -> bool {
        let before = self.handlers.len();
        self.handlers.retain(|(s, _)| *s != subscription);
        self.handlers.len() != before
    }

    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }

    /// Issue page template of the first live navigation subscription
    pub fn browse_url_template(&self) -> Option<String> {
        self.handlers.iter().find_map(|(_, handler)| match handler {
            Handler::Navigate { navigator, .. } => Some(navigator.url_template()),
            Handler::Callback(_) => None,
        })
    }

    /// Fire a double-click over the given selection
    ///
    /// Only the first selected node counts, and only if it belongs to this
    /// network. Handlers run in registration order.
    pub fn double_click(&mut self, selected: &[NodeId]) {
        let node = selected
            .first()
            .copied()
            .filter(|id| self.graph.contains(*id));

        debug!(node = ?node, handlers = self.handlers.len(), "Double click");

        for (_, handler) in &mut self.handlers {
            handler.call(node);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::GraphBuilder;
    use crate::issue::{Issue, IssueLink};
    use std::cell::RefCell;
    use std::rc::Rc;
    use url::Url;

    #[derive(Clone, Default)]
    struct SharedRecorder(Rc<RefCell<Vec<String>>>);

    impl Opener for SharedRecorder {
        fn open(&self, url: &Url) -> crate::Result<()> {
            self.0.borrow_mut().push(url.to_string());
            Ok(())
        }
    }

    fn network() -> Network {
        let mut root = Issue::new("PROJ-1", "root");
        root.links = vec![IssueLink::outward(Issue::new("PROJ-2", "child"))];
        let graph = GraphBuilder::new("PROJ").build(&[root]).unwrap();
        Network::new(graph, NetworkOptions::default())
    }

    fn recorder(net: &mut Network) -> (Subscription, Rc<RefCell<Vec<Option<NodeId>>>>) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let sub = net.on_double_click(move |node| sink.borrow_mut().push(node));
        (sub, seen)
    }

    #[test]
    fn test_double_click_reaches_handler() {
        let mut net = network();
        let (_, seen) = recorder(&mut net);

        net.double_click(&[NodeId(2), NodeId(1)]);
        net.double_click(&[]);

        assert_eq!(*seen.borrow(), vec![Some(NodeId(2)), None]);
    }

    #[test]
    fn test_unknown_node_is_reported_as_none() {
        let mut net = network();
        let (_, seen) = recorder(&mut net);

        net.double_click(&[NodeId(99)]);

        assert_eq!(*seen.borrow(), vec![None]);
    }

    #[test]
    fn test_unsubscribe_stops_delivery() {
        let mut net = network();
        let (first, first_seen) = recorder(&mut net);
        let (_, second_seen) = recorder(&mut net);

        assert!(net.unsubscribe(first));
        assert!(!net.unsubscribe(first));
        assert_eq!(net.handler_count(), 1);

        net.double_click(&[NodeId(1)]);

        assert!(first_seen.borrow().is_empty());
        assert_eq!(*second_seen.borrow(), vec![Some(NodeId(1))]);
    }

    #[test]
    fn test_handlers_dropped_with_network() {
        let mut net = network();
        let (_, seen) = recorder(&mut net);
        assert_eq!(Rc::strong_count(&seen), 2);

        drop(net);

        assert_eq!(Rc::strong_count(&seen), 1);
    }

    #[test]
    fn test_navigation_subscription_opens_issue() {
        let mut net = network();
        let opened = SharedRecorder::default();
        net.navigate_on_double_click(
            Navigator::new("https://jira.example.com", "PROJ"),
            opened.clone(),
        );

        net.double_click(&[NodeId(2)]);
        net.double_click(&[]);
        net.double_click(&[NodeId(99)]);

        assert_eq!(
            *opened.0.borrow(),
            vec!["https://jira.example.com/browse/PROJ-2".to_string()]
        );
    }

    #[test]
    fn test_browse_url_template_follows_subscription() {
        let mut net = network();
        let (_, _seen) = recorder(&mut net);
        assert!(net.browse_url_template().is_none());

        let sub = net.navigate_on_double_click(
            Navigator::new("https://jira.example.com", "PROJ"),
            SharedRecorder::default(),
        );
        assert_eq!(
            net.browse_url_template().as_deref(),
            Some("https://jira.example.com/browse/PROJ-{id}")
        );

        net.unsubscribe(sub);
        assert!(net.browse_url_template().is_none());
    }
}
