//! Static styling passed to the network widget

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkOptions {
    pub nodes: NodeStyle,
    pub edges: EdgeStyle,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeStyle {
    pub border_width: u32,
    pub size: u32,
    pub color: NodeColor,
    pub font: FontStyle,
    pub scaling: Scaling,
    pub shape: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeColor {
    pub border: String,
    pub background: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FontStyle {
    pub color: String,
}

/// Maps node `value` onto a rendered size range
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scaling {
    pub min: u32,
    pub max: u32,
    pub label: LabelScaling,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabelScaling {
    pub enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EdgeStyle {
    pub color: String,
}

impl Default for NetworkOptions {
    fn default() -> Self {
        Self {
            nodes: NodeStyle {
                border_width: 1,
                size: 1000,
                color: NodeColor {
                    border: "#000".to_string(),
                    background: "#fff".to_string(),
                },
                font: FontStyle {
                    color: "#000".to_string(),
                },
                scaling: Scaling {
                    min: 30,
                    max: 300,
                    label: LabelScaling { enabled: true },
                },
                shape: "circle".to_string(),
            },
            edges: EdgeStyle {
                color: "#000".to_string(),
            },
        }
    }
}
