//! End-to-end dispatch through a wired node.

use std::time::Duration;

use meshlan_core::GroupTag;
use meshlan_node::{CapturedFrames, Emitter, InboundFrame, Node, NodeConfig};
use meshlan_routing::RoutingPolicy;
use meshlan_routing::testing::{ipv4_frame, prefix};

async fn wait_for_frames(frames: &CapturedFrames, count: usize) {
    tokio::time::timeout(Duration::from_secs(2), async {
        loop {
            if frames.lock().unwrap().len() >= count {
                return;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    })
    .await
    .expect("timed out waiting for frames");
}

#[tokio::test]
async fn frames_flow_from_intake_to_the_destination_port() {
    let mut node = Node::new(RoutingPolicy::new(false), 64);
    let a = node.attach_port(
        "a",
        GroupTag(1),
        vec![prefix("10.0.0.0/24")],
        16,
        Emitter::Discard,
    );
    let captured = CapturedFrames::default();
    node.attach_port(
        "b",
        GroupTag(2),
        vec![prefix("10.0.1.0/24")],
        16,
        Emitter::Capture(captured.clone()),
    );

    let intake = node.intake();
    let handle = node.shutdown_handle();
    let run = tokio::spawn(async move { node.run().await });

    let frame = ipv4_frame("10.0.1.5");
    intake
        .send(InboundFrame {
            source: a,
            frame: frame.clone(),
        })
        .await
        .unwrap();

    wait_for_frames(&captured, 1).await;
    assert_eq!(captured.lock().unwrap()[0], frame);

    handle.shutdown();
    run.await.unwrap();
}

#[tokio::test]
async fn intra_group_frames_drop_when_client_routing_is_off() {
    let mut node = Node::new(RoutingPolicy::new(false), 64);
    let a = node.attach_port(
        "a",
        GroupTag(1),
        vec![prefix("10.0.0.0/24")],
        16,
        Emitter::Discard,
    );
    let same_group = CapturedFrames::default();
    node.attach_port(
        "b",
        GroupTag(1),
        vec![prefix("10.0.1.0/24")],
        16,
        Emitter::Capture(same_group.clone()),
    );
    let other_group = CapturedFrames::default();
    node.attach_port(
        "c",
        GroupTag(2),
        vec![prefix("10.0.2.0/24")],
        16,
        Emitter::Capture(other_group.clone()),
    );

    let intake = node.intake();
    let handle = node.shutdown_handle();
    let run = tokio::spawn(async move { node.run().await });

    // First frame is intra-group and must drop; the second proves the
    // loop processed past the first.
    intake
        .send(InboundFrame {
            source: a,
            frame: ipv4_frame("10.0.1.5"),
        })
        .await
        .unwrap();
    intake
        .send(InboundFrame {
            source: a,
            frame: ipv4_frame("10.0.2.5"),
        })
        .await
        .unwrap();

    wait_for_frames(&other_group, 1).await;
    assert!(same_group.lock().unwrap().is_empty());

    handle.shutdown();
    run.await.unwrap();
}

#[tokio::test]
async fn reinject_emitter_hairpins_frames_back_through_the_router() {
    // The default route sorts before 10.0.0.0/24 (lower network address),
    // so c's frame lands on the reflector first. The reflector hands it
    // back as its own traffic; the self-route skip then steers the second
    // pass to a's more specific prefix.
    let mut node = Node::new(RoutingPolicy::new(false), 64);
    let captured = CapturedFrames::default();
    node.attach_port(
        "a",
        GroupTag(1),
        vec![prefix("10.0.0.0/24")],
        16,
        Emitter::Capture(captured.clone()),
    );
    node.attach_port(
        "reflector",
        GroupTag(2),
        vec![prefix("0.0.0.0/0")],
        16,
        Emitter::Reinject(node.intake()),
    );
    let c = node.attach_port("c", GroupTag(3), vec![], 16, Emitter::Discard);

    let intake = node.intake();
    let handle = node.shutdown_handle();
    let run = tokio::spawn(async move { node.run().await });

    let frame = ipv4_frame("10.0.0.5");
    intake
        .send(InboundFrame {
            source: c,
            frame: frame.clone(),
        })
        .await
        .unwrap();

    wait_for_frames(&captured, 1).await;
    assert_eq!(captured.lock().unwrap()[0], frame);

    handle.shutdown();
    run.await.unwrap();
}

#[tokio::test]
async fn node_from_config_compiles_routes() {
    let toml = r#"
[routing]
client_routing = true

[[ports]]
name = "tap0"
group = 1
routes = ["10.0.0.0/24"]

[[ports]]
name = "peer-alice"
group = 2
routes = ["10.0.1.0/24", "2001:db8:1::/48"]
emitter = "discard"
"#;
    let config = NodeConfig::parse(toml).unwrap();
    let mut node = Node::from_config(&config).unwrap();
    assert_eq!(node.router().ports().len(), 2);
    assert!(node.router().policy().client_routing_enabled);

    let dump = node.dump_routes();
    assert!(dump.contains("10.0.0.0/24 -> 0 (tap0)"));
    assert!(dump.contains("10.0.1.0/24 -> 1 (peer-alice)"));
    assert!(dump.contains("2001:db8:1::/48 -> 1 (peer-alice)"));
}

#[tokio::test]
async fn node_from_config_rejects_unknown_emitters() {
    let toml = r#"
[[ports]]
name = "tap0"
group = 1
emitter = "teleport"
"#;
    let config = NodeConfig::parse(toml).unwrap();
    let err = Node::from_config(&config).unwrap_err();
    assert!(err.to_string().contains("teleport"));
}

#[tokio::test]
async fn node_from_config_rejects_bad_routes() {
    let toml = r#"
[[ports]]
name = "tap0"
group = 1
routes = ["10.0.0.0/99"]
"#;
    let config = NodeConfig::parse(toml).unwrap();
    assert!(Node::from_config(&config).is_err());
}
