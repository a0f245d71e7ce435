//! Integration tests for the bus-to-queue bridge.

use event_bridge::{BridgeQueue, ChatEvent, ChatMessage, EventBus, RecvError, Topic};

fn hi_from_alice() -> ChatEvent {
    ChatEvent::Message(ChatMessage::new("c1", "u1", "Alice", "hi"))
}

#[tokio::test]
async fn published_payload_arrives_untransformed() {
    let bus = EventBus::new();
    let queue = BridgeQueue::new();
    let _binding = bus.bind_queue(&[Topic::Message], queue.clone());

    bus.publish(hi_from_alice());

    let event = queue.dequeue().await.unwrap();
    assert_eq!(event, hi_from_alice());
    assert_eq!(event.payload().channel_id, "c1");
    assert_eq!(event.payload().user_id, "u1");
    assert_eq!(event.payload().nickname, "Alice");
    assert_eq!(event.payload().content, "hi");
}

#[tokio::test]
async fn fifo_holds_across_publish_and_consume_interleavings() {
    let bus = EventBus::new();
    let queue = BridgeQueue::new();
    let _binding = bus.bind_queue(&[Topic::Message], queue.clone());

    let event = |n: &str| ChatEvent::Message(ChatMessage::new("c1", "u1", "Alice", n));

    // Buffered before any consumer.
    bus.publish(event("a"));
    bus.publish(event("b"));
    assert_eq!(queue.dequeue().await.unwrap(), event("a"));

    // Consumer waiting before the producer.
    let waiting = {
        let q = queue.clone();
        tokio::spawn(async move {
            let first = q.dequeue().await.unwrap();
            let second = q.dequeue().await.unwrap();
            (first, second)
        })
    };
    tokio::task::yield_now().await;
    bus.publish(event("c"));

    let (first, second) = waiting.await.unwrap();
    assert_eq!(first, event("b"));
    assert_eq!(second, event("c"));
}

#[tokio::test]
async fn each_bound_queue_sees_the_full_stream_independently() {
    let bus = EventBus::new();
    let fast = BridgeQueue::new();
    let slow = BridgeQueue::new();
    let _fast_binding = bus.bind_queue(&[Topic::Message], fast.clone());
    let _slow_binding = bus.bind_queue(&[Topic::Message], slow.clone());

    let event = |n: &str| ChatEvent::Message(ChatMessage::new("c1", "u1", "Alice", n));
    bus.publish(event("one"));
    bus.publish(event("two"));

    // Fast consumer drains immediately; slow one later. Order is per-queue.
    assert_eq!(fast.dequeue().await.unwrap(), event("one"));
    assert_eq!(fast.dequeue().await.unwrap(), event("two"));
    assert_eq!(slow.dequeue().await.unwrap(), event("one"));
    assert_eq!(slow.dequeue().await.unwrap(), event("two"));
}

#[tokio::test]
async fn topics_bind_independently() {
    let bus = EventBus::new();
    let messages_only = BridgeQueue::new();
    let everything = BridgeQueue::new();
    let _m = bus.bind_queue(&[Topic::Message], messages_only.clone());
    let _e = bus.bind_queue(&[Topic::Message, Topic::Question], everything.clone());

    let question = ChatEvent::Question(ChatMessage::new("c1", "u2", "Bob", "why?"));
    bus.publish(question.clone());
    bus.publish(hi_from_alice());

    assert_eq!(messages_only.dequeue().await.unwrap(), hi_from_alice());
    assert!(messages_only.is_empty());

    assert_eq!(everything.dequeue().await.unwrap(), question);
    assert_eq!(everything.dequeue().await.unwrap(), hi_from_alice());
}

#[tokio::test]
async fn closed_binding_cancels_consumer_and_stops_delivery() {
    let bus = EventBus::new();
    let queue = BridgeQueue::new();
    let binding = bus.bind_queue(&[Topic::Message], queue.clone());

    let consumer = {
        let q = queue.clone();
        tokio::spawn(async move { q.dequeue().await })
    };
    tokio::task::yield_now().await;

    binding.close();
    assert_eq!(consumer.await.unwrap(), Err(RecvError::Closed));

    bus.publish(hi_from_alice());
    assert!(queue.is_empty());
    assert_eq!(bus.listener_count(Topic::Message), 0);
}
