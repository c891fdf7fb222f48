// Flag-byte framing over blocking streams.
//
// Decoding always reads the flag byte on its own, then the rest of the frame
// with exact-length reads sized from the decoded header. A Game-Control frame
// needs one extra step: its two header bytes are read before the pattern and
// wrong-letter run, whose combined length they declare. Declared lengths
// above the protocol maxima are rejected before any payload is allocated.
//
// Writers encode the whole frame first and issue it as one `write_all`
// followed by `flush`, so buffered writers never hold half a frame.

use std::io::{Read, Write};

use crate::error::ProtocolError;
use crate::message::{ClientPacket, GameControl, ServerPacket, check_len};
use crate::types::{
    CONTROL_FLAG, GUESS_FLAG, MAX_INCORRECT, MAX_MESSAGE_LEN, MAX_WORD_LEN, START_FLAG,
};

/// Fill `buf` completely or report the connection as closed.
fn read_full<R: Read>(reader: &mut R, buf: &mut [u8]) -> Result<(), ProtocolError> {
    reader
        .read_exact(buf)
        .map_err(|_| ProtocolError::ConnectionClosed)
}

fn read_flag<R: Read>(reader: &mut R) -> Result<u8, ProtocolError> {
    let mut flag = [0u8; 1];
    read_full(reader, &mut flag)?;
    Ok(flag[0])
}

/// Write one server frame and flush.
pub fn write_server_packet<W: Write>(
    writer: &mut W,
    packet: &ServerPacket,
) -> Result<(), ProtocolError> {
    let frame = packet.encode()?;
    writer.write_all(&frame)?;
    writer.flush()?;
    Ok(())
}

/// Read one server frame.
pub fn read_server_packet<R: Read>(reader: &mut R) -> Result<ServerPacket, ProtocolError> {
    let flag = read_flag(reader)?;
    if flag == CONTROL_FLAG {
        let mut header = [0u8; 2];
        read_full(reader, &mut header)?;
        let word_len = usize::from(header[0]);
        let wrong_count = usize::from(header[1]);
        check_len("word length", word_len, MAX_WORD_LEN)?;
        check_len("wrong count", wrong_count, MAX_INCORRECT)?;

        let mut body = vec![0u8; word_len + wrong_count];
        read_full(reader, &mut body)?;
        let wrong = body.split_off(word_len);
        return Ok(ServerPacket::Control(GameControl {
            display: body,
            wrong,
        }));
    }

    let len = usize::from(flag);
    check_len("message length", len, MAX_MESSAGE_LEN)?;
    let mut text = vec![0u8; len];
    read_full(reader, &mut text)?;
    Ok(ServerPacket::Message(
        String::from_utf8_lossy(&text).into_owned(),
    ))
}

/// Write one client frame and flush.
pub fn write_client_packet<W: Write>(
    writer: &mut W,
    packet: ClientPacket,
) -> Result<(), ProtocolError> {
    writer.write_all(&packet.encode())?;
    writer.flush()?;
    Ok(())
}

/// Read one client frame.
pub fn read_client_packet<R: Read>(reader: &mut R) -> Result<ClientPacket, ProtocolError> {
    match read_flag(reader)? {
        START_FLAG => Ok(ClientPacket::Start),
        GUESS_FLAG => {
            let mut letter = [0u8; 1];
            read_full(reader, &mut letter)?;
            Ok(ClientPacket::Guess(letter[0]))
        }
        other => Err(ProtocolError::UnknownFlag(other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn server_roundtrip(packet: &ServerPacket) -> ServerPacket {
        let mut wire = Vec::new();
        write_server_packet(&mut wire, packet).unwrap();
        let mut cursor = Cursor::new(&wire);
        let decoded = read_server_packet(&mut cursor).unwrap();
        assert_eq!(cursor.position() as usize, wire.len(), "trailing bytes");
        decoded
    }

    #[test]
    fn control_roundtrip_preserves_lengths_and_bytes() {
        let control = GameControl {
            display: b"c_t_e__s".to_vec(),
            wrong: b"qzxjkv".to_vec(),
        };
        match server_roundtrip(&ServerPacket::Control(control.clone())) {
            ServerPacket::Control(decoded) => {
                assert_eq!(decoded.word_len(), 8);
                assert_eq!(decoded.wrong_count(), 6);
                assert_eq!(decoded, control);
            }
            other => panic!("expected Control, got {other:?}"),
        }
    }

    #[test]
    fn control_roundtrip_with_no_wrong_letters() {
        let packet = ServerPacket::Control(GameControl {
            display: b"___".to_vec(),
            wrong: Vec::new(),
        });
        assert_eq!(server_roundtrip(&packet), packet);
    }

    #[test]
    fn message_roundtrip() {
        let packet = ServerPacket::message("The word was cat");
        assert_eq!(server_roundtrip(&packet), packet);
    }

    #[test]
    fn frames_in_sequence() {
        let packets = vec![
            ServerPacket::message("The word was dog"),
            ServerPacket::message("You Lose!"),
            ServerPacket::message("Game Over!"),
        ];
        let mut wire = Vec::new();
        for p in &packets {
            write_server_packet(&mut wire, p).unwrap();
        }
        let mut cursor = Cursor::new(&wire);
        for expected in &packets {
            assert_eq!(&read_server_packet(&mut cursor).unwrap(), expected);
        }
        assert!(matches!(
            read_server_packet(&mut cursor),
            Err(ProtocolError::ConnectionClosed)
        ));
    }

    #[test]
    fn eof_before_flag_is_connection_closed() {
        let mut cursor = Cursor::new(Vec::<u8>::new());
        assert!(matches!(
            read_server_packet(&mut cursor),
            Err(ProtocolError::ConnectionClosed)
        ));
    }

    #[test]
    fn short_message_payload_is_connection_closed() {
        // Declares 5 bytes, delivers 2.
        let mut cursor = Cursor::new(vec![5u8, b'h', b'i']);
        assert!(matches!(
            read_server_packet(&mut cursor),
            Err(ProtocolError::ConnectionClosed)
        ));
    }

    #[test]
    fn short_control_header_is_connection_closed() {
        let mut cursor = Cursor::new(vec![0u8, 3]);
        assert!(matches!(
            read_server_packet(&mut cursor),
            Err(ProtocolError::ConnectionClosed)
        ));
    }

    #[test]
    fn oversized_message_flag_rejected() {
        let mut cursor = Cursor::new(vec![100u8; 101]);
        assert!(matches!(
            read_server_packet(&mut cursor),
            Err(ProtocolError::FrameTooLarge { len: 100, max: 99, .. })
        ));
    }

    #[test]
    fn oversized_control_word_rejected() {
        let mut cursor = Cursor::new(vec![0u8, 9, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0]);
        assert!(matches!(
            read_server_packet(&mut cursor),
            Err(ProtocolError::FrameTooLarge {
                field: "word length",
                ..
            })
        ));
    }

    #[test]
    fn client_start_and_guess() {
        let mut wire = Vec::new();
        write_client_packet(&mut wire, ClientPacket::Start).unwrap();
        write_client_packet(&mut wire, ClientPacket::Guess(b'a')).unwrap();
        assert_eq!(wire, vec![0, 1, b'a']);

        let mut cursor = Cursor::new(&wire);
        assert_eq!(read_client_packet(&mut cursor).unwrap(), ClientPacket::Start);
        assert_eq!(
            read_client_packet(&mut cursor).unwrap(),
            ClientPacket::Guess(b'a')
        );
    }

    #[test]
    fn guess_without_letter_is_connection_closed() {
        let mut cursor = Cursor::new(vec![GUESS_FLAG]);
        assert!(matches!(
            read_client_packet(&mut cursor),
            Err(ProtocolError::ConnectionClosed)
        ));
    }

    #[test]
    fn unknown_client_flag_rejected() {
        let mut cursor = Cursor::new(vec![7u8, b'x']);
        assert!(matches!(
            read_client_packet(&mut cursor),
            Err(ProtocolError::UnknownFlag(7))
        ));
    }
}
