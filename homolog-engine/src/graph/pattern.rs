//! Directed weighted pattern graphs over entities.

use homolog_core::errors::GraphError;
use homolog_core::types::collections::{FxHashMap, FxHashSet};
use petgraph::graph::{DiGraph, EdgeIndex, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;

use super::{Entity, Relation, TypeRegistry};

/// A small directed weighted multigraph of entities and typed relations.
///
/// Used both as a corpus unit and as a query. Parallel edges between the
/// same ordered vertex pair are permitted and kept distinct. Every pattern
/// owns its own [`TypeRegistry`], populated from its own entities as they
/// are inserted.
#[derive(Debug, Clone)]
pub struct Pattern {
    graph: DiGraph<Entity, Relation>,
    vertices: FxHashMap<String, NodeIndex>,
    registry: TypeRegistry,
}

impl Default for Pattern {
    fn default() -> Self {
        Self::new()
    }
}

impl Pattern {
    pub fn new() -> Self {
        Self {
            graph: DiGraph::new(),
            vertices: FxHashMap::default(),
            registry: TypeRegistry::new(),
        }
    }

    /// Insert an entity, registering its tags in the pattern registry.
    ///
    /// The id must be non-empty. Re-inserting an already-present id returns
    /// the existing vertex unchanged.
    pub fn add_entity(&mut self, entity: Entity) -> Result<NodeIndex, GraphError> {
        if entity.id().is_empty() {
            return Err(GraphError::EmptyEntityId);
        }
        Ok(self.insert_entity(entity))
    }

    /// Insertion path for entities already known to be valid.
    fn insert_entity(&mut self, entity: Entity) -> NodeIndex {
        if let Some(&existing) = self.vertices.get(entity.id()) {
            return existing;
        }
        for tag in entity.tags() {
            self.registry.register(tag.clone());
        }
        let id = entity.id().to_string();
        let index = self.graph.add_node(entity);
        self.vertices.insert(id, index);
        index
    }

    /// Connect two member entities with a relation.
    ///
    /// Fails with an invalid-reference error, leaving the pattern
    /// unmodified, if either endpoint has not been inserted.
    pub fn add_relation(
        &mut self,
        source: &str,
        relation: Relation,
        target: &str,
    ) -> Result<EdgeIndex, GraphError> {
        let source_index =
            self.vertices
                .get(source)
                .copied()
                .ok_or_else(|| GraphError::UnknownEntity {
                    relation: relation.id().to_string(),
                    entity: source.to_string(),
                })?;
        let target_index =
            self.vertices
                .get(target)
                .copied()
                .ok_or_else(|| GraphError::UnknownEntity {
                    relation: relation.id().to_string(),
                    entity: target.to_string(),
                })?;
        Ok(self.graph.add_edge(source_index, target_index, relation))
    }

    pub fn vertex_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// Look up a vertex by entity id.
    pub fn node(&self, id: &str) -> Option<NodeIndex> {
        self.vertices.get(id).copied()
    }

    pub fn entity(&self, vertex: NodeIndex) -> &Entity {
        &self.graph[vertex]
    }

    /// Vertices in insertion order.
    pub fn vertex_indices(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        self.graph.node_indices()
    }

    pub fn entities(&self) -> impl Iterator<Item = &Entity> {
        self.graph.node_weights()
    }

    pub fn relations(&self) -> impl Iterator<Item = &Relation> {
        self.graph.edge_weights()
    }

    /// Directed edges as (source, relation, target) triples.
    pub fn edges(&self) -> impl Iterator<Item = (NodeIndex, &Relation, NodeIndex)> {
        self.graph
            .edge_references()
            .map(|edge| (edge.source(), edge.weight(), edge.target()))
    }

    /// Total degree (in + out, parallel edges counted individually).
    pub fn degree(&self, vertex: NodeIndex) -> usize {
        self.graph.edges_directed(vertex, Direction::Outgoing).count()
            + self.graph.edges_directed(vertex, Direction::Incoming).count()
    }

    /// Neighbors across incident edges in either direction, one entry per
    /// edge — parallel edges repeat their endpoint.
    pub fn undirected_neighbors(&self, vertex: NodeIndex) -> impl Iterator<Item = NodeIndex> + '_ {
        self.graph.neighbors_undirected(vertex)
    }

    /// Whether a directed edge source → target exists.
    pub fn has_edge(&self, source: NodeIndex, target: NodeIndex) -> bool {
        self.graph.find_edge(source, target).is_some()
    }

    /// Vertices reachable within exactly k undirected hops, excluding the
    /// origin. Breadth-first, no revisits.
    pub fn k_hop_neighbors(&self, origin: NodeIndex, k: usize) -> FxHashSet<NodeIndex> {
        let mut reached: FxHashSet<NodeIndex> = FxHashSet::default();
        let mut frontier = vec![origin];

        for _ in 0..k {
            let mut next = Vec::new();
            for &vertex in &frontier {
                for neighbor in self.graph.neighbors_undirected(vertex) {
                    if neighbor != origin && reached.insert(neighbor) {
                        next.push(neighbor);
                    }
                }
            }
            if next.is_empty() {
                break;
            }
            frontier = next;
        }

        reached
    }

    /// Extract the induced subgraph over a vertex subset: only edges with
    /// both endpoints inside the subset survive. The new pattern derives
    /// its own registry from the extracted vertices.
    pub fn induced_subgraph(&self, vertices: &FxHashSet<NodeIndex>) -> Pattern {
        let mut subgraph = Pattern::new();

        for vertex in self.graph.node_indices() {
            if vertices.contains(&vertex) {
                subgraph.insert_entity(self.graph[vertex].clone());
            }
        }

        for edge in self.graph.edge_references() {
            if vertices.contains(&edge.source()) && vertices.contains(&edge.target()) {
                let source = self.graph[edge.source()].id().to_string();
                let target = self.graph[edge.target()].id().to_string();
                // Both endpoints were just inserted above.
                let _ = subgraph.add_relation(&source, edge.weight().clone(), &target);
            }
        }

        subgraph
    }

    pub fn registry(&self) -> &TypeRegistry {
        &self.registry
    }

    /// Mutable registry access, for recording subtype taxonomy.
    pub fn registry_mut(&mut self) -> &mut TypeRegistry {
        &mut self.registry
    }

    /// The union of all entity tags — the pattern's domain vocabulary.
    pub fn domain_tags(&self) -> &FxHashSet<String> {
        self.registry.tags()
    }

    /// All entities carrying a given tag.
    pub fn entities_by_tag(&self, tag: &str) -> Vec<&Entity> {
        self.graph
            .node_weights()
            .filter(|entity| entity.has_tag(tag))
            .collect()
    }
}
