//! src/ui/node.rs
//!
//! Recursive layout tree of panels, rebuilt every frame.
//!
//! Panels borrow the state they show for the lifetime of one frame, so the
//! tree is generic over that borrow instead of owning shared handles.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Anything that can paint itself into a rectangle of the frame.
pub trait Panel {
    fn draw(&self, f: &mut Frame<'_>, area: Rect);
}

pub enum Node<'a> {
    Split {
        direction: Direction,
        constraints: Vec<Constraint>,
        children: Vec<Node<'a>>,
    },
    Leaf(Box<dyn Panel + 'a>),
}

impl Node<'_> {
    pub fn draw(&self, f: &mut Frame<'_>, area: Rect) {
        match self {
            Node::Split {
                direction,
                constraints,
                children,
            } => {
                let chunks = Layout::default()
                    .direction(*direction)
                    .constraints(constraints.iter().copied())
                    .split(area);
                for (child, chunk) in children.iter().zip(chunks.iter()) {
                    child.draw(f, *chunk);
                }
            }
            Node::Leaf(panel) => panel.draw(f, area),
        }
    }
}

/// Children stacked top to bottom.
pub fn rows<'a>(constraints: Vec<Constraint>, children: Vec<Node<'a>>) -> Node<'a> {
    Node::Split {
        direction: Direction::Vertical,
        constraints,
        children,
    }
}

/// Children side by side.
pub fn columns<'a>(constraints: Vec<Constraint>, children: Vec<Node<'a>>) -> Node<'a> {
    Node::Split {
        direction: Direction::Horizontal,
        constraints,
        children,
    }
}

pub fn leaf<'a>(panel: impl Panel + 'a) -> Node<'a> {
    Node::Leaf(Box::new(panel))
}
