use serde_json::{json, Value as Json};
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tempfile::tempdir;
use vaultkv::{Config, Engine, EngineError};

fn config_in(dir: &std::path::Path) -> Config {
    Config {
        snapshot_path: dir.join("snapshot.json"),
        ..Config::default()
    }
}

#[test]
fn snapshot_round_trip_restores_values_ttls_and_sorted_sets() {
    let dir = tempdir().unwrap();
    let config = config_in(dir.path());

    let engine = Engine::open(&config);
    engine.execute("set", &[json!("name"), json!("vault")]).unwrap();
    engine.execute("set", &[json!("session"), json!("abc"), json!(100)]).unwrap();
    engine.execute("rpush", &[json!("queue"), json!("a"), json!("b")]).unwrap();
    engine.execute("hset", &[json!("user"), json!("age"), json!(30)]).unwrap();
    engine.execute("zadd", &[json!("board"), json!(100), json!("alice")]).unwrap();
    engine.execute("zadd", &[json!("board"), json!(20), json!("bob")]).unwrap();
    engine.save_snapshot().unwrap();

    let restored = Engine::open(&config);
    assert_eq!(restored.execute("get", &[json!("name")]).unwrap(), json!("vault"));
    assert_eq!(
        restored.execute("lrange", &[json!("queue"), json!(0), json!(-1)]).unwrap(),
        json!(["a", "b"])
    );
    assert_eq!(
        restored.execute("hgetall", &[json!("user")]).unwrap(),
        json!({"age": "30"})
    );
    assert_eq!(
        restored.execute("zgetAll", &[json!("board")]).unwrap(),
        json!([[20.0, "bob"], [100.0, "alice"]])
    );

    let ttl = restored.execute("ttl", &[json!("session")]).unwrap();
    let ttl = ttl.as_i64().unwrap();
    assert!((95..=100).contains(&ttl), "ttl was {}", ttl);
    assert_eq!(restored.execute("ttl", &[json!("name")]).unwrap(), json!(-1));
}

#[test]
fn list_values_reload_as_lists() {
    let dir = tempdir().unwrap();
    let config = config_in(dir.path());

    let engine = Engine::open(&config);
    engine.execute("lpush", &[json!("l"), json!("x")]).unwrap();
    engine.save_snapshot().unwrap();

    let restored = Engine::open(&config);
    assert_eq!(restored.execute("llen", &[json!("l")]).unwrap(), json!(1));
    let err = restored.execute("get", &[json!("l")]).unwrap_err();
    assert_eq!(err.kind(), "wrong_type");
}

#[test]
fn concurrent_set_and_delete_leave_no_dangling_expiry() {
    let dir = tempdir().unwrap();
    let engine = Arc::new(Engine::open(&config_in(dir.path())));

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let engine = engine.clone();
            thread::spawn(move || {
                for _ in 0..500 {
                    if i % 2 == 0 {
                        engine
                            .execute("set", &[json!("hot"), json!("v"), json!(60)])
                            .unwrap();
                    } else {
                        engine.execute("delete", &[json!("hot")]).unwrap();
                    }
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    let stats = engine.stats();
    assert!(stats.volatile_keys <= stats.keys);

    let exists = engine.execute("exists", &[json!("hot")]).unwrap();
    let ttl = engine.execute("ttl", &[json!("hot")]).unwrap();
    if exists == json!(true) {
        assert!(ttl.as_i64().unwrap() > 0);
    } else {
        assert_eq!(ttl, json!(-2));
    }
}

#[test]
fn expired_keys_vanish_without_a_sweep() {
    let dir = tempdir().unwrap();
    let engine = Engine::open(&config_in(dir.path()));

    engine.execute("set", &[json!("k"), json!("v"), json!(1)]).unwrap();
    thread::sleep(Duration::from_millis(1100));

    assert_eq!(engine.execute("get", &[json!("k")]).unwrap(), Json::Null);
    assert_eq!(engine.execute("exists", &[json!("k")]).unwrap(), json!(false));
}

#[test]
fn unknown_operations_are_unsupported() {
    let dir = tempdir().unwrap();
    let engine = Engine::open(&config_in(dir.path()));

    let err = engine.execute("sadd", &[json!("s"), json!("m")]).unwrap_err();
    assert!(matches!(err, EngineError::UnsupportedOperation(ref name) if name == "sadd"));
}

#[test]
fn aliases_reach_the_same_operations() {
    let dir = tempdir().unwrap();
    let engine = Engine::open(&config_in(dir.path()));

    engine.execute("ZSET", &[json!("s"), json!(1), json!("a")]).unwrap();
    engine.execute("zset", &[json!("s"), json!(2), json!("b")]).unwrap();
    assert_eq!(engine.execute("zdelvalue", &[json!("s"), json!("a")]).unwrap(), json!(1));
    assert_eq!(
        engine.execute("zrange", &[json!("s"), json!(0), json!(-1)]).unwrap(),
        json!(["b"])
    );
    assert_eq!(engine.execute("ZDELKEY", &[json!("s")]).unwrap(), json!(1));

    engine.execute("rpush", &[json!("l"), json!("a")]).unwrap();
    assert_eq!(engine.execute("delpush", &[json!("l")]).unwrap(), json!("OK"));
    assert_eq!(engine.execute("exists", &[json!("l")]).unwrap(), json!(false));
}
