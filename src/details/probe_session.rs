use crate::details::icmp::codec::{self, DecodedReply};
use crate::details::icmp::{IcmpEcho, SequenceNumber, TSocket};
use crate::details::records::Probe;
use crate::details::{PingError, PingResult};
use crate::{ProbeOutcome, ReplyError, SessionConfig, Target};
use std::time::Instant;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub(crate) enum State {
    Idle,
    Sending,
    AwaitingReply,
    Done,
}

pub(crate) struct ProbeSession<S> {
    icmp_echo: IcmpEcho<S>,
    target: Target,
    config: SessionConfig,
    next_sequence_number: SequenceNumber,
    probes_done: u16,
    state: State,
}

impl<S> ProbeSession<S>
where
    S: TSocket,
{
    pub(crate) fn new(icmp_echo: IcmpEcho<S>, target: Target, config: SessionConfig) -> Self {
        ProbeSession {
            icmp_echo,
            target,
            config,
            next_sequence_number: SequenceNumber::start_value(),
            probes_done: 0,
            state: State::Idle,
        }
    }

    pub(crate) fn state(&self) -> State {
        self.state
    }

    pub(crate) fn identifier(&self) -> u16 {
        self.icmp_echo.identifier()
    }

    pub(crate) fn target(&self) -> Target {
        self.target
    }

    fn probe_once(&mut self, sequence_number: SequenceNumber) -> PingResult<ProbeOutcome> {
        // (1) Send probe.
        self.state = State::Sending;
        let probe = self.icmp_echo.send_to(self.target.ip_addr(), sequence_number, self.config.packet_size)?;

        // (2) Wait for the reply, one deadline for the whole slot.
        self.state = State::AwaitingReply;
        let deadline = probe.send_time.checked_add(self.config.timeout).ok_or_else(|| {
            PingError::InvalidConfig(format!("timeout of {:?} is out of range", self.config.timeout))
        })?;
        loop {
            let Some(raw_reply) = self.icmp_echo.try_receive(deadline)? else {
                tracing::trace!("echo request {} timed out", sequence_number);
                return Ok(ProbeOutcome::Timeout);
            };

            // (3) Decode and classify.
            match codec::decode(&raw_reply.bytes, self.icmp_echo.address_family()) {
                Err(PingError::MalformedReply { length }) => {
                    tracing::warn!("malformed reply of {} bytes to echo request {}", length, sequence_number);
                    return Ok(ProbeOutcome::ProtocolError(ReplyError::MalformedReply { length }));
                }
                Err(e) => return Err(e),
                Ok(reply) if self.icmp_echo.is_own_request(&reply) => {
                    tracing::trace!("ignoring looped back echo request {}", reply.sequence_number);
                }
                Ok(reply) => return Ok(self.classify(&probe, &reply, raw_reply.receive_time)),
            }
        }
    }

    fn classify(&self, probe: &Probe, reply: &DecodedReply, receive_time: Instant) -> ProbeOutcome {
        let is_echo_reply = reply.icmp_type == self.icmp_echo.address_family().echo_reply_type();
        if is_echo_reply && reply.sequence_number == probe.sequence_number && reply.identifier == probe.identifier {
            let round_trip = receive_time.saturating_duration_since(probe.send_time);
            let round_trip_ms = u64::try_from((round_trip.as_micros() + 500) / 1000).unwrap_or(u64::MAX);
            tracing::trace!(
                "echo reply {} with {} bytes of payload after {} ms",
                reply.sequence_number,
                probe.payload.len(),
                round_trip_ms
            );
            return ProbeOutcome::Success { round_trip_ms };
        }

        tracing::warn!(
            "unexpected reply to echo request {}: type {} code {} identifier {} sequence number {}",
            probe.sequence_number,
            reply.icmp_type,
            reply.icmp_code,
            reply.identifier,
            reply.sequence_number
        );
        ProbeOutcome::ProtocolError(ReplyError::UnexpectedReply {
            icmp_type: reply.icmp_type,
            icmp_code: reply.icmp_code,
        })
    }
}

impl<S> Iterator for ProbeSession<S>
where
    S: TSocket,
{
    type Item = PingResult<ProbeOutcome>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.state == State::Done {
            return None;
        }
        // Sleeping before the next probe instead of after each one spares the last interval.
        if self.probes_done > 0 && !self.config.interval.is_zero() {
            std::thread::sleep(self.config.interval);
        }

        let sequence_number = self.next_sequence_number;
        let result = self.probe_once(sequence_number);
        self.probes_done += 1;
        self.next_sequence_number = sequence_number.next();

        self.state = if result.is_err() || self.probes_done >= self.config.max_number_of_times {
            State::Done
        } else {
            State::Idle
        };
        Some(result)
    }
}
