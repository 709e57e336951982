//! Network rendering: styling, event subscriptions and page output

mod html;
mod network;
mod options;

pub use html::HtmlPage;
pub use network::{Network, Subscription};
pub use options::{
    EdgeStyle, FontStyle, LabelScaling, NetworkOptions, NodeColor, NodeStyle, Scaling,
};
