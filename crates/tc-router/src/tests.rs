//! Unit tests for tc-router.
//!
//! All tests use hand-crafted catalogues and graphs.

#[cfg(test)]
mod helpers {
    use tc_catalogue::Catalogue;
    use tc_core::{GeoPoint, RoutingSettings, VertexId};

    use crate::{Graph, GraphBuilder};

    /// Stops A, B, C, D; bus "14" runs A→B→C and back; D is never served.
    ///
    /// Distances: A→B 1000, B→C 1000 (reverse directions fall back).
    pub fn abc_catalogue() -> Catalogue {
        let mut c = Catalogue::new();
        let a = c.add_stop("A", GeoPoint::new(55.60, 37.20)).unwrap();
        let b = c.add_stop("B", GeoPoint::new(55.61, 37.20)).unwrap();
        let cc = c.add_stop("C", GeoPoint::new(55.62, 37.20)).unwrap();
        c.add_stop("D", GeoPoint::new(55.70, 37.30)).unwrap();
        c.set_distance(a, b, 1_000).unwrap();
        c.set_distance(b, cc, 1_000).unwrap();
        c.add_bus("14", &["A", "B", "C"], false).unwrap();
        c
    }

    /// wait 6 min, 40 m/min.
    pub fn settings() -> RoutingSettings {
        RoutingSettings::new(6.0, 40.0).unwrap()
    }

    /// Five vertices:
    ///
    /// ```text
    /// 0 →(10) 1 →(10) 2 →(10) 4
    /// 0 →(50) 3 →(10) 4
    /// 0 →(45) 4
    /// ```
    ///
    /// Shortest 0→4 is 0→1→2→4 = 30.
    pub fn chain_graph() -> Graph {
        let mut b = GraphBuilder::new();
        b.add_vertex_range(5);
        let v = VertexId;
        b.add_edge(v(0), v(1), 10.0).unwrap();
        b.add_edge(v(1), v(2), 10.0).unwrap();
        b.add_edge(v(2), v(4), 10.0).unwrap();
        b.add_edge(v(0), v(3), 50.0).unwrap();
        b.add_edge(v(3), v(4), 10.0).unwrap();
        b.add_edge(v(0), v(4), 45.0).unwrap();
        b.build()
    }
}

// ── Graph ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod graph {
    use tc_core::{EdgeId, VertexId};

    use crate::{Graph, GraphBuilder, RouterError};

    #[test]
    fn empty_build() {
        let g = Graph::empty();
        assert_eq!(g.vertex_count(), 0);
        assert_eq!(g.edge_count(), 0);
        assert!(g.is_empty());
        assert!(g.edges_from(VertexId(0)).is_empty());
    }

    #[test]
    fn vertex_range_appends() {
        let mut b = GraphBuilder::new();
        assert_eq!(b.add_vertex_range(3), 0..3);
        assert_eq!(b.add_vertex_range(2), 3..5);
        assert_eq!(b.vertex_count(), 5);
    }

    #[test]
    fn edge_ids_follow_insertion_order() {
        let g = super::helpers::chain_graph();
        assert_eq!(g.edge_count(), 6);
        let e = g.edge(EdgeId(3)).unwrap();
        assert_eq!((e.from, e.to, e.weight), (VertexId(0), VertexId(3), 50.0));
        assert!(g.edge(EdgeId(6)).is_none());
    }

    #[test]
    fn edges_from_in_insertion_order() {
        let g = super::helpers::chain_graph();
        assert_eq!(g.edges_from(VertexId(0)), &[EdgeId(0), EdgeId(3), EdgeId(5)]);
        assert_eq!(g.edges_from(VertexId(4)), &[] as &[EdgeId]);
        assert_eq!(g.out_degree(VertexId(3)), 1);
        for v in 0..5 {
            for &e in g.edges_from(VertexId(v)) {
                assert_eq!(g.edge(e).unwrap().from, VertexId(v));
            }
        }
    }

    #[test]
    fn invalid_vertex_rejected() {
        let mut b = GraphBuilder::new();
        b.add_vertex_range(2);
        let err = b.add_edge(VertexId(0), VertexId(2), 1.0).unwrap_err();
        assert!(matches!(err, RouterError::InvalidVertex { vertex: VertexId(2), count: 2 }));
        assert_eq!(b.edge_count(), 0);
    }

    #[test]
    fn invalid_weight_rejected() {
        let mut b = GraphBuilder::new();
        b.add_vertex_range(2);
        for w in [-1.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                b.add_edge(VertexId(0), VertexId(1), w),
                Err(RouterError::InvalidWeight(_))
            ));
        }
        assert!(b.add_edge(VertexId(0), VertexId(1), 0.0).is_ok());
    }
}

// ── Network → graph ───────────────────────────────────────────────────────────

#[cfg(test)]
mod network {
    use tc_catalogue::Catalogue;
    use tc_core::{BusId, CoreError, GeoPoint, RoutingSettings, StopId, VertexId};

    use crate::{RouterError, build_transit_graph};

    #[test]
    fn every_reachable_pair_gets_an_edge() {
        let c = super::helpers::abc_catalogue();
        let t = build_transit_graph(&c, &super::helpers::settings()).unwrap();

        // Outbound A→B, A→C, B→C; back C→B, C→A, B→A.
        let edges: Vec<_> = t
            .graph
            .edges()
            .iter()
            .map(|e| (e.from.0, e.to.0, e.weight))
            .collect();
        assert_eq!(
            edges,
            vec![
                (0, 1, 31.0),
                (0, 2, 56.0),
                (1, 2, 31.0),
                (2, 1, 31.0),
                (2, 0, 56.0),
                (1, 0, 31.0),
            ]
        );
        assert_eq!(t.rides.len(), 6);
        assert_eq!(t.rides[1].bus, BusId(0));
        assert_eq!(t.rides[1].span_count, 2);
        assert_eq!(t.rides[1].ride_time, 50.0);
    }

    #[test]
    fn unserved_stop_has_no_vertex() {
        let c = super::helpers::abc_catalogue();
        let t = build_transit_graph(&c, &super::helpers::settings()).unwrap();
        assert_eq!(t.graph.vertex_count(), 3);
        assert_eq!(t.stops.vertex_of(StopId(3)), None);
        assert_eq!(t.stops.vertex_of(StopId(2)), Some(VertexId(2)));
        assert_eq!(t.stops.stop_of(VertexId(1)), Some(StopId(1)));
        assert_eq!(t.stops.stop_count(), 4);
    }

    #[test]
    fn vertices_skip_unserved_stops_in_order() {
        let mut c = Catalogue::new();
        let x = c.add_stop("X", GeoPoint::default()).unwrap();
        c.add_stop("lonely", GeoPoint::default()).unwrap();
        let y = c.add_stop("Y", GeoPoint::default()).unwrap();
        c.set_distance(x, y, 400).unwrap();
        c.add_bus("1", &["Y", "X"], false).unwrap();

        let t = build_transit_graph(&c, &super::helpers::settings()).unwrap();
        assert_eq!(t.stops.vertex_stops(), &[StopId(0), StopId(2)]);
    }

    #[test]
    fn directional_distance_used_for_each_run() {
        let mut c = super::helpers::abc_catalogue();
        // Coming back from C to B is longer.
        c.set_distance(StopId(2), StopId(1), 2_000).unwrap();
        let t = build_transit_graph(&c, &super::helpers::settings()).unwrap();
        let back = t.graph.edges()[3];
        assert_eq!((back.from, back.to), (VertexId(2), VertexId(1)));
        assert_eq!(back.weight, 6.0 + 50.0);
        // C→A = C→B (2000) + B→A (fallback 1000)
        assert_eq!(t.graph.edges()[4].weight, 6.0 + 75.0);
    }

    #[test]
    fn round_trip_is_one_run_without_self_edges() {
        let mut c = Catalogue::new();
        let a = c.add_stop("A", GeoPoint::default()).unwrap();
        let b = c.add_stop("B", GeoPoint::default()).unwrap();
        let cc = c.add_stop("C", GeoPoint::default()).unwrap();
        c.set_distance(a, b, 400).unwrap();
        c.set_distance(b, cc, 400).unwrap();
        c.set_distance(cc, a, 400).unwrap();
        c.add_bus("ring", &["A", "B", "C"], true).unwrap();

        let t = build_transit_graph(&c, &super::helpers::settings()).unwrap();
        // Run A B C A: pairs (0,1) (0,2) (1,2) (1,3) (2,3); (0,3) is A→A.
        assert_eq!(t.graph.edge_count(), 5);
        assert!(t.graph.edges().iter().all(|e| e.from != e.to));
        // B→A rides B→C→A: 800 m.
        let b_to_a = t.graph.edges()[3];
        assert_eq!((b_to_a.from, b_to_a.to), (VertexId(1), VertexId(0)));
        assert_eq!(b_to_a.weight, 6.0 + 20.0);
        assert_eq!(t.rides[3].span_count, 2);
    }

    #[test]
    fn missing_distance_fails() {
        let mut c = Catalogue::new();
        c.add_stop("A", GeoPoint::default()).unwrap();
        c.add_stop("B", GeoPoint::default()).unwrap();
        c.add_bus("1", &["A", "B"], false).unwrap();
        let err = build_transit_graph(&c, &super::helpers::settings()).unwrap_err();
        assert!(matches!(
            err,
            RouterError::MissingDistance { ref from, ref to } if from == "A" && to == "B"
        ));
    }

    #[test]
    fn invalid_settings_fail() {
        let c = super::helpers::abc_catalogue();
        let bad = RoutingSettings { bus_wait_time: 6.0, bus_velocity: 0.0 };
        assert!(matches!(
            build_transit_graph(&c, &bad),
            Err(RouterError::Config(CoreError::Config(_)))
        ));
    }

    #[test]
    fn deterministic() {
        let c = super::helpers::abc_catalogue();
        let s = super::helpers::settings();
        let a = build_transit_graph(&c, &s).unwrap();
        let b = build_transit_graph(&c, &s).unwrap();
        assert_eq!(a.graph, b.graph);
        assert_eq!(a.rides, b.rides);
        assert_eq!(a.stops, b.stops);
    }

    #[test]
    fn empty_catalogue_gives_empty_graph() {
        let t = build_transit_graph(&Catalogue::new(), &super::helpers::settings()).unwrap();
        assert!(t.graph.is_empty());
        assert!(t.rides.is_empty());
    }
}

// ── Router ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod routing {
    use tc_core::{EdgeId, VertexId};

    use crate::{Graph, GraphBuilder, RouteEntry, Router, RouterError};

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn router_is_shareable() {
        assert_send_sync::<Router>();
        assert_send_sync::<crate::TransportRouter>();
    }

    #[test]
    fn trivial_same_vertex() {
        let r = Router::build(super::helpers::chain_graph());
        for v in 0..5 {
            let it = r.shortest(VertexId(v), VertexId(v)).unwrap().unwrap();
            assert!(it.is_trivial());
            assert_eq!(it.total_weight, 0.0);
        }
    }

    #[test]
    fn shortest_path_correct() {
        let g = super::helpers::chain_graph();
        let r = Router::build(g.clone());
        let it = r.shortest(VertexId(0), VertexId(4)).unwrap().unwrap();

        assert_eq!(it.total_weight, 30.0);
        assert_eq!(it.edges, vec![EdgeId(0), EdgeId(1), EdgeId(2)]);

        // Verify edge sequence connectivity
        assert_eq!(g.edge(it.edges[0]).unwrap().from, VertexId(0));
        for pair in it.edges.windows(2) {
            assert_eq!(g.edge(pair[0]).unwrap().to, g.edge(pair[1]).unwrap().from);
        }
        assert_eq!(g.edge(it.edges[2]).unwrap().to, VertexId(4));
    }

    #[test]
    fn direct_edge_entry_has_edge_as_predecessor() {
        let r = Router::build(super::helpers::chain_graph());
        let e = r.entry(VertexId(0), VertexId(1)).unwrap().unwrap();
        assert_eq!(e, RouteEntry { weight: 10.0, prev_edge: Some(EdgeId(0)) });
        let diag = r.entry(VertexId(3), VertexId(3)).unwrap().unwrap();
        assert_eq!(diag, RouteEntry { weight: 0.0, prev_edge: None });
    }

    #[test]
    fn no_route_directed() {
        let r = Router::build(super::helpers::chain_graph());
        // Nothing leaves 4.
        assert!(r.shortest(VertexId(4), VertexId(0)).unwrap().is_none());
        assert!(r.entry(VertexId(4), VertexId(0)).unwrap().is_none());
    }

    #[test]
    fn disconnected_vertices() {
        let mut b = GraphBuilder::new();
        b.add_vertex_range(2);
        let r = Router::build(b.build());
        assert!(r.shortest(VertexId(0), VertexId(1)).unwrap().is_none());
        assert!(r.shortest(VertexId(1), VertexId(1)).unwrap().is_some());
    }

    #[test]
    fn parallel_edges_keep_cheapest_then_first() {
        let mut b = GraphBuilder::new();
        b.add_vertex_range(2);
        b.add_edge(VertexId(0), VertexId(1), 9.0).unwrap();
        b.add_edge(VertexId(0), VertexId(1), 4.0).unwrap();
        b.add_edge(VertexId(0), VertexId(1), 4.0).unwrap();
        let r = Router::build(b.build());
        let it = r.shortest(VertexId(0), VertexId(1)).unwrap().unwrap();
        assert_eq!(it.edges, vec![EdgeId(1)]);
        assert_eq!(it.total_weight, 4.0);
    }

    #[test]
    fn tie_keeps_earlier_route() {
        // 0→2 direct (20) ties 0→1→2 (10 + 10): the seeded direct edge stays.
        let mut b = GraphBuilder::new();
        b.add_vertex_range(3);
        b.add_edge(VertexId(0), VertexId(2), 20.0).unwrap();
        b.add_edge(VertexId(0), VertexId(1), 10.0).unwrap();
        b.add_edge(VertexId(1), VertexId(2), 10.0).unwrap();
        let r = Router::build(b.build());
        let it = r.shortest(VertexId(0), VertexId(2)).unwrap().unwrap();
        assert_eq!(it.edges, vec![EdgeId(0)]);
    }

    #[test]
    fn self_loop_never_beats_identity() {
        let mut b = GraphBuilder::new();
        b.add_vertex_range(1);
        b.add_edge(VertexId(0), VertexId(0), 0.0).unwrap();
        let r = Router::build(b.build());
        let it = r.shortest(VertexId(0), VertexId(0)).unwrap().unwrap();
        assert!(it.is_trivial());
    }

    #[test]
    fn zero_weight_edges_allowed() {
        let mut b = GraphBuilder::new();
        b.add_vertex_range(3);
        b.add_edge(VertexId(0), VertexId(1), 0.0).unwrap();
        b.add_edge(VertexId(1), VertexId(2), 0.0).unwrap();
        let r = Router::build(b.build());
        let it = r.shortest(VertexId(0), VertexId(2)).unwrap().unwrap();
        assert_eq!(it.edges.len(), 2);
        assert_eq!(it.total_weight, 0.0);
    }

    #[test]
    fn empty_graph_is_success() {
        let r = Router::build(Graph::empty());
        assert_eq!(r.vertex_count(), 0);
        assert!(matches!(
            r.shortest(VertexId(0), VertexId(0)),
            Err(RouterError::InvalidVertex { count: 0, .. })
        ));
    }

    #[test]
    fn out_of_range_vertex() {
        let r = Router::build(super::helpers::chain_graph());
        assert!(matches!(
            r.shortest(VertexId(0), VertexId(5)),
            Err(RouterError::InvalidVertex { vertex: VertexId(5), count: 5 })
        ));
        assert!(r.shortest(VertexId(9), VertexId(0)).is_err());
        assert!(r.row(VertexId(5)).is_err());
    }

    #[test]
    fn from_parts_roundtrip() {
        let r = Router::build(super::helpers::chain_graph());
        let table: Vec<_> = (0..5).flat_map(|v| r.row(VertexId(v)).unwrap().to_vec()).collect();
        let again = Router::from_parts(r.graph().clone(), table).unwrap();
        assert_eq!(again, r);
    }

    #[test]
    fn from_parts_rejects_bad_tables() {
        let g = super::helpers::chain_graph();
        let good = RouteEntry { weight: 1.0, prev_edge: Some(EdgeId(0)) };

        assert!(Router::from_parts(g.clone(), vec![None; 24]).is_err());

        let mut t = vec![None; 25];
        t[1] = Some(RouteEntry { weight: 1.0, prev_edge: Some(EdgeId(6)) });
        assert!(matches!(Router::from_parts(g.clone(), t), Err(RouterError::Inconsistent(_))));

        let mut t = vec![None; 25];
        t[1] = Some(RouteEntry { weight: -1.0, ..good });
        assert!(matches!(Router::from_parts(g.clone(), t), Err(RouterError::Inconsistent(_))));

        let mut t = vec![None; 25];
        t[1] = Some(RouteEntry { weight: f64::NAN, ..good });
        assert!(Router::from_parts(g, t).is_err());
    }

    #[test]
    fn broken_chain_is_inconsistent() {
        // (0,1) points at edge 0 but (0,0) is missing, so the walk back fails.
        let mut b = GraphBuilder::new();
        b.add_vertex_range(2);
        b.add_edge(VertexId(0), VertexId(1), 1.0).unwrap();
        let mut t = vec![None; 4];
        t[1] = Some(RouteEntry { weight: 1.0, prev_edge: Some(EdgeId(0)) });
        let r = Router::from_parts(b.build(), t).unwrap();
        assert!(matches!(
            r.shortest(VertexId(0), VertexId(1)),
            Err(RouterError::Inconsistent(_))
        ));
    }

    #[test]
    fn predecessor_cycle_is_bounded() {
        // Edges 1→2 and 2→1 whose table entries point at each other.
        let mut b = GraphBuilder::new();
        b.add_vertex_range(3);
        b.add_edge(VertexId(1), VertexId(2), 1.0).unwrap();
        b.add_edge(VertexId(2), VertexId(1), 1.0).unwrap();
        let mut t = vec![None; 9];
        t[1] = Some(RouteEntry { weight: 1.0, prev_edge: Some(EdgeId(1)) }); // (0,1) via 2→1
        t[2] = Some(RouteEntry { weight: 1.0, prev_edge: Some(EdgeId(0)) }); // (0,2) via 1→2
        let r = Router::from_parts(b.build(), t).unwrap();
        assert!(matches!(
            r.shortest(VertexId(0), VertexId(1)),
            Err(RouterError::Inconsistent(_))
        ));
    }

    #[test]
    fn predecessor_that_misses_destination_is_inconsistent() {
        let mut b = GraphBuilder::new();
        b.add_vertex_range(3);
        b.add_edge(VertexId(0), VertexId(1), 1.0).unwrap();
        let mut t = vec![None; 9];
        t[0] = Some(RouteEntry { weight: 0.0, prev_edge: None });
        // (0,2) claims to arrive over 0→1, which ends at the wrong vertex.
        t[2] = Some(RouteEntry { weight: 1.0, prev_edge: Some(EdgeId(0)) });
        let r = Router::from_parts(b.build(), t).unwrap();
        assert!(r.shortest(VertexId(0), VertexId(2)).is_err());
    }
}

// ── Transport router ──────────────────────────────────────────────────────────

#[cfg(test)]
mod transport {
    use tc_catalogue::Catalogue;
    use tc_core::{BusId, GeoPoint, StopId};

    use crate::{RouteItem, RouterError, TransportRouter};

    fn abc_router() -> (Catalogue, TransportRouter) {
        let c = super::helpers::abc_catalogue();
        let r = TransportRouter::new(&c, super::helpers::settings()).unwrap();
        (c, r)
    }

    #[test]
    fn multi_stop_ride_skips_second_wait() {
        let (_, r) = abc_router();
        let j = r.route(StopId(0), StopId(2)).unwrap().unwrap();
        assert_eq!(j.total_time, 56.0);
        assert_eq!(j.legs.len(), 1);
        let leg = &j.legs[0];
        assert_eq!((leg.from, leg.to, leg.bus), (StopId(0), StopId(2), BusId(0)));
        assert_eq!(leg.span_count, 2);
        assert_eq!(leg.wait_time, 6.0);
        assert_eq!(leg.ride_time, 50.0);
    }

    #[test]
    fn items_alternate_wait_and_ride() {
        let (_, r) = abc_router();
        let j = r.route(StopId(2), StopId(1)).unwrap().unwrap();
        assert_eq!(
            j.items(),
            vec![
                RouteItem::Wait { stop: StopId(2), time: 6.0 },
                RouteItem::Ride { bus: BusId(0), span_count: 1, time: 25.0 },
            ]
        );
    }

    #[test]
    fn unserved_stop_unreachable() {
        let (_, r) = abc_router();
        let d = StopId(3);
        for other in 0..3 {
            assert!(r.route(StopId(other), d).unwrap().is_none());
            assert!(r.route(d, StopId(other)).unwrap().is_none());
        }
        // ...but it can always stay where it is.
        assert!(r.route(d, d).unwrap().unwrap().is_empty());
    }

    #[test]
    fn same_stop_is_empty_journey() {
        let (_, r) = abc_router();
        let j = r.route(StopId(1), StopId(1)).unwrap().unwrap();
        assert!(j.is_empty());
        assert_eq!(j.total_time, 0.0);
        assert!(j.items().is_empty());
    }

    #[test]
    fn unknown_stop_id() {
        let (_, r) = abc_router();
        assert!(matches!(r.route(StopId(0), StopId(4)), Err(RouterError::InvalidStop(StopId(4)))));
    }

    #[test]
    fn by_name() {
        let (c, r) = abc_router();
        let j = r.route_by_name(&c, "A", "C").unwrap().unwrap();
        assert_eq!(j.total_time, 56.0);
        assert!(matches!(
            r.route_by_name(&c, "A", "Z"),
            Err(RouterError::UnknownStopName(name)) if name == "Z"
        ));
    }

    #[test]
    fn transfer_between_buses() {
        // Bus 1: A→B (800 m).  Bus 2: B→E (400 m).  wait 2, 40 m/min.
        let mut c = Catalogue::new();
        let a = c.add_stop("A", GeoPoint::default()).unwrap();
        let b = c.add_stop("B", GeoPoint::default()).unwrap();
        let e = c.add_stop("E", GeoPoint::default()).unwrap();
        c.set_distance(a, b, 800).unwrap();
        c.set_distance(b, e, 400).unwrap();
        c.add_bus("1", &["A", "B"], false).unwrap();
        c.add_bus("2", &["B", "E"], false).unwrap();

        let r = TransportRouter::new(&c, tc_core::RoutingSettings::new(2.0, 40.0).unwrap()).unwrap();
        let j = r.route(a, e).unwrap().unwrap();
        // (2 + 20) + (2 + 10)
        assert_eq!(j.total_time, 34.0);
        let buses: Vec<_> = j.legs.iter().map(|l| l.bus).collect();
        assert_eq!(buses, vec![BusId(0), BusId(1)]);
        assert_eq!(j.legs[0].to, j.legs[1].from);
    }

    #[test]
    fn cheaper_transfer_beats_long_ride() {
        // Bus "slow" loops A→B→C the long way; "fast" covers A→C directly.
        let mut c = Catalogue::new();
        let a = c.add_stop("A", GeoPoint::default()).unwrap();
        let b = c.add_stop("B", GeoPoint::default()).unwrap();
        let cc = c.add_stop("C", GeoPoint::default()).unwrap();
        c.set_distance(a, b, 4_000).unwrap();
        c.set_distance(b, cc, 4_000).unwrap();
        c.set_distance(a, cc, 400).unwrap();
        c.add_bus("slow", &["A", "B", "C"], false).unwrap();
        c.add_bus("fast", &["A", "C"], false).unwrap();

        let r = TransportRouter::new(&c, super::helpers::settings()).unwrap();
        let j = r.route(a, cc).unwrap().unwrap();
        assert_eq!(j.total_time, 16.0);
        assert_eq!(j.legs[0].bus, c.find_bus("fast").unwrap());
    }

    #[test]
    fn from_parts_checks_dimensions() {
        let (_, r) = abc_router();
        let mut rides = r.rides().to_vec();
        rides.pop();
        let err = TransportRouter::from_parts(
            *r.settings(),
            r.stops().clone(),
            rides,
            r.router().clone(),
        )
        .unwrap_err();
        assert!(matches!(err, RouterError::Inconsistent(_)));

        let again = TransportRouter::from_parts(
            *r.settings(),
            r.stops().clone(),
            r.rides().to_vec(),
            r.router().clone(),
        )
        .unwrap();
        assert_eq!(again, r);
    }
}

// ── Laws ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod laws {
    use proptest::prelude::*;
    use tc_core::VertexId;

    use crate::{Graph, GraphBuilder, Router};

    /// Up to 7 vertices, up to 20 edges.  Weights are positive integers so
    /// sums are exact, like the wait-inclusive transit edges.
    fn graph_strategy() -> impl Strategy<Value = Graph> {
        (1usize..8).prop_flat_map(|n| {
            prop::collection::vec((0..n as u32, 0..n as u32, 1u32..50), 0..20).prop_map(
                move |edges| {
                    let mut b = GraphBuilder::new();
                    b.add_vertex_range(n);
                    for (from, to, w) in edges {
                        b.add_edge(VertexId(from), VertexId(to), f64::from(w)).unwrap();
                    }
                    b.build()
                },
            )
        })
    }

    /// Reference distances by Bellman–Ford from `source`.
    fn bellman_ford(g: &Graph, source: usize) -> Vec<Option<f64>> {
        let mut dist = vec![None; g.vertex_count()];
        dist[source] = Some(0.0);
        for _ in 0..g.vertex_count() {
            for e in g.edges() {
                if let Some(d) = dist[e.from.index()] {
                    let cand = d + e.weight;
                    if dist[e.to.index()].is_none_or(|cur| cand < cur) {
                        dist[e.to.index()] = Some(cand);
                    }
                }
            }
        }
        dist
    }

    proptest! {
        #[test]
        fn identity_is_zero(g in graph_strategy()) {
            let r = Router::build(g);
            for v in 0..r.vertex_count() as u32 {
                let it = r.shortest(VertexId(v), VertexId(v)).unwrap().unwrap();
                prop_assert!(it.is_trivial());
                prop_assert_eq!(it.total_weight, 0.0);
            }
        }

        #[test]
        fn never_worse_than_an_edge(g in graph_strategy()) {
            let r = Router::build(g.clone());
            for e in g.edges() {
                let it = r.shortest(e.from, e.to).unwrap().unwrap();
                prop_assert!(it.total_weight <= e.weight);
            }
        }

        #[test]
        fn triangle_inequality(g in graph_strategy()) {
            let r = Router::build(g);
            let n = r.vertex_count() as u32;
            for i in 0..n {
                for k in 0..n {
                    for j in 0..n {
                        let (Some(ik), Some(kj)) = (
                            r.entry(VertexId(i), VertexId(k)).unwrap(),
                            r.entry(VertexId(k), VertexId(j)).unwrap(),
                        ) else { continue };
                        let ij = r.entry(VertexId(i), VertexId(j)).unwrap();
                        prop_assert!(ij.is_some());
                        prop_assert!(ij.unwrap().weight <= ik.weight + kj.weight);
                    }
                }
            }
        }

        #[test]
        fn matches_bellman_ford_and_walks_are_consistent(g in graph_strategy()) {
            let r = Router::build(g.clone());
            let n = g.vertex_count();
            for from in 0..n {
                let reference = bellman_ford(&g, from);
                for to in 0..n {
                    let got = r.shortest(VertexId(from as u32), VertexId(to as u32)).unwrap();
                    prop_assert_eq!(got.as_ref().map(|it| it.total_weight), reference[to]);
                    let Some(it) = got else { continue };

                    // The edges form a walk from `from` to `to` whose weights
                    // add up to the recorded total.
                    let mut at = VertexId(from as u32);
                    let mut sum = 0.0;
                    for id in &it.edges {
                        let e = g.edge(*id).unwrap();
                        prop_assert_eq!(e.from, at);
                        at = e.to;
                        sum += e.weight;
                    }
                    prop_assert_eq!(at, VertexId(to as u32));
                    prop_assert_eq!(sum, it.total_weight);
                    prop_assert!(it.edges.len() < n.max(1));
                }
            }
        }
    }
}
