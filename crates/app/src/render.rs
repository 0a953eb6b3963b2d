use crate::style::{Color, Curve, Stroke, TreeStyle};
use kintree_data::Gender;
use kintree_layout::{Edge, FamilyGraph, NodePosition};
use serde::Serialize;

/// A card with the colours a renderer should paint it with
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StyledCard {
    #[serde(flatten)]
    pub position: NodePosition,
    pub fill: Color,
    pub stroke: Stroke,
    /// Colour of the marriage handle, only on the left card of a couple
    #[serde(skip_serializing_if = "Option::is_none")]
    pub handle: Option<Color>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StyledEdge {
    #[serde(flatten)]
    pub edge: Edge,
    pub stroke: Stroke,
    pub curve: Curve,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct StyledGraph {
    pub positions: Vec<StyledCard>,
    pub edges: Vec<StyledEdge>,
}

fn parse_gender(gender: Option<&str>) -> Option<Gender> {
    gender.and_then(|g| g.parse().ok())
}

pub fn style_graph(graph: FamilyGraph, style: &impl TreeStyle) -> StyledGraph {
    let positions = graph
        .positions
        .into_iter()
        .map(|position| {
            let fill = style.card_fill(position.payload.gender());
            let handle = position
                .is_left_spouse
                .then(|| style.card_fill(parse_gender(position.spouse_gender.as_deref())));
            StyledCard {
                position,
                fill,
                stroke: style.card_stroke(),
                handle,
            }
        })
        .collect();

    let edges = graph
        .edges
        .into_iter()
        .map(|edge| StyledEdge {
            stroke: style.edge_stroke(edge.kind),
            curve: style.edge_curve(edge.kind),
            edge,
        })
        .collect();

    StyledGraph { positions, edges }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::Palette;
    use kintree_data::PersonRecord;
    use kintree_layout::layout_family;
    use test_log::test;

    fn couple() -> Vec<PersonRecord> {
        vec![
            PersonRecord::new("a", "Ann").with_gender("female").with_spouse("b"),
            PersonRecord::new("b", "Bob").with_gender("male").with_spouse("a"),
            PersonRecord::new("c", "Cal").with_parent("a"),
        ]
    }

    #[test]
    fn test_cards_are_coloured_by_gender() {
        let palette = Palette::default();
        let styled = style_graph(layout_family(&couple()), &palette);
        assert_eq!(styled.positions.len(), 3);

        let card = |id: &str| {
            styled
                .positions
                .iter()
                .find(|card| card.position.id.as_str() == id)
                .unwrap()
        };
        assert_eq!(card("a").fill, palette.female);
        assert_eq!(card("a").handle, Some(palette.male));
        assert_eq!(card("b").fill, palette.male);
        assert_eq!(card("b").handle, None);
        assert_eq!(card("c").fill, palette.unknown);
    }

    #[test]
    fn test_edges_are_stroked_by_kind() {
        let palette = Palette::default();
        let styled = style_graph(layout_family(&couple()), &palette);
        assert_eq!(styled.edges.len(), 2);
        for edge in &styled.edges {
            match edge.edge.kind {
                kintree_layout::EdgeKind::Spousal => {
                    assert_eq!(edge.stroke, palette.spousal);
                    assert_eq!(edge.curve, Curve::Straight);
                }
                kintree_layout::EdgeKind::Descent => {
                    assert_eq!(edge.stroke, palette.descent);
                    assert_eq!(edge.curve, Curve::Smoothstep);
                }
            }
        }
    }

    #[test]
    fn test_styled_json_shape() {
        let styled = style_graph(layout_family(&couple()), &Palette::default());
        let value = serde_json::to_value(&styled).unwrap();
        let first = &value["positions"][0];
        assert_eq!(first["id"], "a");
        assert_eq!(first["isLeftSpouse"], true);
        assert_eq!(first["fill"], "#f9a8d4");
        assert_eq!(first["handle"], "#93c5fd");
        assert_eq!(first["payload"]["name"], "Ann");

        let spousal = &value["edges"][0];
        assert_eq!(spousal["kind"], "spousal");
        assert_eq!(spousal["stroke"]["color"], "#f472b6");
        assert_eq!(spousal["curve"], "straight");
        assert_eq!(value["edges"][1]["curve"], "smoothstep");
    }
}
