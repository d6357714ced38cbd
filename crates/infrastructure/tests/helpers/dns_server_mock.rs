use hickory_proto::op::{Message, MessageType, OpCode, ResponseCode};
use hickory_proto::rr::Record;
use hickory_proto::serialize::binary::BinEncodable;
use std::net::{IpAddr, SocketAddr};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, UdpSocket};
use tokio::sync::oneshot;

/// How the mock answers every query it receives.
#[derive(Debug, Clone, Default)]
pub struct MockBehavior {
    pub answers: Vec<Record>,

    pub rcode: Option<ResponseCode>,

    /// UDP replies carry the TC bit and no answers; TCP replies are complete.
    pub truncate_udp: bool,

    /// Number of UDP queries silently dropped before answering.
    pub drop_first_udp: usize,

    /// Reply with an id that never matches the query.
    pub wrong_id: bool,
}

impl MockBehavior {
    pub fn answering(answers: Vec<Record>) -> Self {
        Self {
            answers,
            ..Self::default()
        }
    }

    pub fn rcode(rcode: ResponseCode) -> Self {
        Self {
            rcode: Some(rcode),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeenQuery {
    pub protocol: &'static str,
    pub name: String,
    pub record_type: u16,
    pub recursion_desired: bool,
}

#[derive(Default)]
struct MockState {
    udp_hits: AtomicUsize,
    tcp_hits: AtomicUsize,
    seen: Mutex<Vec<SeenQuery>>,
}

/// In-process DNS server listening on the same port over UDP and TCP.
pub struct MockDnsServer {
    addr: SocketAddr,
    state: Arc<MockState>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl MockDnsServer {
    pub async fn start(behavior: MockBehavior) -> std::io::Result<Self> {
        Self::start_on("127.0.0.1".parse().unwrap(), 0, behavior).await
    }

    pub async fn start_on(ip: IpAddr, port: u16, behavior: MockBehavior) -> std::io::Result<Self> {
        let udp = UdpSocket::bind(SocketAddr::new(ip, port)).await?;
        let addr = udp.local_addr()?;
        let tcp = TcpListener::bind(addr).await?;

        let state = Arc::new(MockState::default());
        let (shutdown_tx, mut shutdown_rx) = oneshot::channel();

        let task_state = Arc::clone(&state);
        tokio::spawn(async move {
            let mut buf = vec![0u8; 4096];

            loop {
                tokio::select! {
                    _ = &mut shutdown_rx => break,
                    result = udp.recv_from(&mut buf) => {
                        if let Ok((len, peer)) = result {
                            let hit = task_state.udp_hits.fetch_add(1, Ordering::SeqCst);
                            if hit < behavior.drop_first_udp {
                                continue;
                            }
                            if let Some(reply) = respond(&buf[..len], &behavior, "UDP", &task_state) {
                                let _ = udp.send_to(&reply, peer).await;
                            }
                        }
                    }
                    accepted = tcp.accept() => {
                        if let Ok((mut stream, _)) = accepted {
                            task_state.tcp_hits.fetch_add(1, Ordering::SeqCst);
                            let mut len_buf = [0u8; 2];
                            if stream.read_exact(&mut len_buf).await.is_err() {
                                continue;
                            }
                            let mut query = vec![0u8; u16::from_be_bytes(len_buf) as usize];
                            if stream.read_exact(&mut query).await.is_err() {
                                continue;
                            }
                            if let Some(reply) = respond(&query, &behavior, "TCP", &task_state) {
                                let _ = stream.write_all(&(reply.len() as u16).to_be_bytes()).await;
                                let _ = stream.write_all(&reply).await;
                                let _ = stream.flush().await;
                            }
                        }
                    }
                }
            }
        });

        Ok(Self {
            addr,
            state,
            shutdown_tx: Some(shutdown_tx),
        })
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn udp_hits(&self) -> usize {
        self.state.udp_hits.load(Ordering::SeqCst)
    }

    pub fn tcp_hits(&self) -> usize {
        self.state.tcp_hits.load(Ordering::SeqCst)
    }

    pub fn seen(&self) -> Vec<SeenQuery> {
        self.state.seen.lock().unwrap().clone()
    }

    pub fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

impl Drop for MockDnsServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

fn respond(
    query_bytes: &[u8],
    behavior: &MockBehavior,
    protocol: &'static str,
    state: &MockState,
) -> Option<Vec<u8>> {
    let query = Message::from_vec(query_bytes).ok()?;

    for q in query.queries() {
        state.seen.lock().unwrap().push(SeenQuery {
            protocol,
            name: q.name().to_utf8(),
            record_type: u16::from(q.query_type()),
            recursion_desired: query.recursion_desired(),
        });
    }

    let id = if behavior.wrong_id {
        query.id().wrapping_add(1)
    } else {
        query.id()
    };

    let mut reply = Message::new(id, MessageType::Response, OpCode::Query);
    reply.set_recursion_desired(query.recursion_desired());
    reply.set_recursion_available(true);
    reply.set_response_code(behavior.rcode.unwrap_or(ResponseCode::NoError));
    for q in query.queries() {
        reply.add_query(q.clone());
    }

    if protocol == "UDP" && behavior.truncate_udp {
        reply.set_truncated(true);
    } else {
        for answer in &behavior.answers {
            reply.add_answer(answer.clone());
        }
    }

    reply.to_vec().ok()
}
