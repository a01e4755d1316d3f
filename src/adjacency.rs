use std::collections::HashMap;

use glam::DVec3;

use crate::{
    cell::{Cell, ExteriorCell},
    topology::{Edge, Face},
    vertex::Vertex,
};

/// Link interior cells across shared faces, wrap every hull face in an exterior
/// cell, link the exterior cells across shared edges and set the hull normals.
///
/// `cells` must hold only interior cells on entry.
pub(crate) fn compute_adjacency(vertices: &mut [Vertex], cells: &mut Vec<Cell>) {
    let interior_count = cells.len();

    let faces: Vec<Face> = cells
        .iter()
        .enumerate()
        .filter_map(|(index, cell)| cell.as_interior().map(|c| Face::all(index, &c.vertices)))
        .flatten()
        .collect();

    let mut open: HashMap<[usize; 3], Face> = HashMap::with_capacity(faces.len());

    for face in &faces {
        match open.remove(&face.key()) {
            Some(other) => {
                cells[face.cell].set_neighbour(face.slot, other.cell);
                cells[other.cell].set_neighbour(other.slot, face.cell);
            }
            None => {
                open.insert(face.key(), *face);
            }
        }
    }

    // walk the faces again so exterior cells come out in a stable order
    for face in faces.iter().filter(|&f| open.get(&f.key()) == Some(f)) {
        let [p0, p1, p2] = face.vertices.map(|v| vertices[v].position);
        let normal = (p1 - p0).cross(p2 - p0);

        for v in face.vertices {
            vertices[v].normal += normal;
        }

        let exterior = cells.len();
        cells[face.cell].set_neighbour(face.slot, exterior);
        cells.push(Cell::Exterior(ExteriorCell::new(face.vertices, face.cell)));
    }

    let edges: Vec<Edge> = cells[interior_count..]
        .iter()
        .enumerate()
        .filter_map(|(offset, cell)| {
            cell.as_exterior()
                .map(|c| Edge::all(interior_count + offset, &c.vertices))
        })
        .flatten()
        .collect();

    let mut open_edges: HashMap<[usize; 2], Edge> = HashMap::with_capacity(edges.len());

    for edge in &edges {
        match open_edges.remove(&edge.key()) {
            Some(other) => {
                cells[edge.cell].set_neighbour(edge.slot, other.cell);
                cells[other.cell].set_neighbour(other.slot, edge.cell);
            }
            None => {
                open_edges.insert(edge.key(), *edge);
            }
        }
    }

    if !open_edges.is_empty() {
        tracing::warn!(
            unmatched = open_edges.len(),
            "hull surface is not closed, some exterior cells lack neighbours"
        );
    }

    // normalize all hull probes' normals, interior probes stay zero
    for vertex in vertices.iter_mut() {
        vertex.normal = vertex.normal.normalize_or_zero();
    }

    tracing::debug!(
        interior = interior_count,
        exterior = cells.len() - interior_count,
        hull_probes = vertices.iter().filter(|v| v.normal != DVec3::ZERO).count(),
        "computed adjacency"
    );
}

// =============================================================================

#[cfg(test)]
mod test {
    use super::*;
    use crate::cell::InteriorCell;

    fn corner_vertices() -> Vec<Vertex> {
        [
            (0.0, 0.0, 0.0),
            (1.0, 0.0, 0.0),
            (0.0, 1.0, 0.0),
            (0.0, 0.0, 1.0),
        ]
        .map(|p| Vertex::new(p.into()))
        .to_vec()
    }

    // negative orientation, like every cell the insertion produces
    fn corner_cells(vertices: &[Vertex]) -> Vec<Cell> {
        let positions: Vec<DVec3> = vertices.iter().map(|v| v.position).collect();
        vec![Cell::Interior(InteriorCell::new([0, 2, 1, 3], &positions))]
    }

    #[test]
    fn test_single_cell_hull() {
        let mut vertices = corner_vertices();
        let mut cells = corner_cells(&vertices);

        compute_adjacency(&mut vertices, &mut cells);

        assert_eq!(cells.len(), 5);
        assert_eq!(cells[0].neighbours(), [Some(1), Some(2), Some(3), Some(4)]);

        for (index, cell) in cells.iter().enumerate().skip(1) {
            let exterior = cell.as_exterior().unwrap();
            assert_eq!(exterior.interior(), Some(0));
            // each hull triangle borders the other three
            let mut others: Vec<usize> = exterior.neighbours()[..3]
                .iter()
                .map(|n| n.unwrap())
                .collect();
            others.sort_unstable();
            let expected: Vec<usize> = (1..5).filter(|&i| i != index).collect();
            assert_eq!(others, expected);
        }
    }

    #[test]
    fn test_hull_normals_point_outward() {
        let mut vertices = corner_vertices();
        let mut cells = corner_cells(&vertices);

        compute_adjacency(&mut vertices, &mut cells);

        assert!(vertices[0]
            .normal
            .abs_diff_eq(-DVec3::ONE.normalize(), 1e-12));

        let centroid = DVec3::splat(0.25);
        for vertex in &vertices {
            assert!((vertex.normal.length() - 1.0).abs() < 1e-12);
            assert!(vertex.normal.dot(vertex.position - centroid) > 0.0);
        }
    }

    #[test]
    fn test_two_cells_share_face() {
        let mut vertices = corner_vertices();
        vertices.push(Vertex::new(DVec3::splat(2.0)));
        let positions: Vec<DVec3> = vertices.iter().map(|v| v.position).collect();

        // glued on (1, 2, 3)
        let mut cells = vec![
            Cell::Interior(InteriorCell::new([0, 2, 1, 3], &positions)),
            Cell::Interior(InteriorCell::new([4, 1, 2, 3], &positions)),
        ];

        compute_adjacency(&mut vertices, &mut cells);

        assert_eq!(cells.len(), 8);
        assert_eq!(cells[0].neighbour(0), Some(1));
        assert_eq!(cells[1].neighbour(0), Some(0));
        assert!(cells[2..].iter().all(|c| c.as_exterior().is_some()));
        assert!(cells
            .iter()
            .all(|c| c.neighbours().iter().all(Option::is_some)));
    }
}
